//! Diesel schema for board persistence.

diesel::table! {
    /// Board headers.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Owning team.
        team_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Background descriptor; http(s) values are image URLs.
        background -> Text,
    }
}

diesel::table! {
    /// Lists, ordered per board by `position`.
    board_lists (id) {
        /// List identifier.
        id -> Uuid,
        /// Owning board.
        board_id -> Uuid,
        /// List title.
        #[max_length = 255]
        title -> Varchar,
        /// Position within the board.
        position -> Int4,
    }
}

diesel::table! {
    /// Cards, ordered per list by `position`.
    cards (id) {
        /// Card identifier.
        id -> Uuid,
        /// Owning list.
        list_id -> Uuid,
        /// Card title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Position within the list.
        position -> Int4,
    }
}

diesel::joinable!(board_lists -> boards (board_id));
diesel::joinable!(cards -> board_lists (list_id));

diesel::allow_tables_to_appear_in_same_query!(boards, board_lists, cards);

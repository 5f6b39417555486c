//! Feedback sink that records everything and answers from a script.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::board::ports::{Celebration, ConfirmationPrompt, Notice, UserFeedback};

/// Recording [`UserFeedback`] implementation for tests and headless use.
///
/// Confirmations are answered from a queue of scripted answers, falling back
/// to a fixed default once the queue is empty.
#[derive(Debug, Clone)]
pub struct RecordingFeedback {
    state: Arc<Mutex<FeedbackState>>,
}

#[derive(Debug)]
struct FeedbackState {
    default_answer: bool,
    scripted: VecDeque<bool>,
    prompts: Vec<ConfirmationPrompt>,
    notices: Vec<Notice>,
    celebrations: Vec<Celebration>,
}

impl Default for RecordingFeedback {
    fn default() -> Self {
        Self::answering(true)
    }
}

impl RecordingFeedback {
    /// Creates a sink that confirms every prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sink answering every unscripted prompt with `answer`.
    #[must_use]
    pub fn answering(answer: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(FeedbackState {
                default_answer: answer,
                scripted: VecDeque::new(),
                prompts: Vec::new(),
                notices: Vec::new(),
                celebrations: Vec::new(),
            })),
        }
    }

    /// Queues the answer for the next prompt.
    pub fn answer_next(&self, answer: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.scripted.push_back(answer);
        }
    }

    /// Returns every prompt shown so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<ConfirmationPrompt> {
        self.state
            .lock()
            .map(|state| state.prompts.clone())
            .unwrap_or_default()
    }

    /// Returns every notice shown so far.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.state
            .lock()
            .map(|state| state.notices.clone())
            .unwrap_or_default()
    }

    /// Returns every celebration played so far.
    #[must_use]
    pub fn celebrations(&self) -> Vec<Celebration> {
        self.state
            .lock()
            .map(|state| state.celebrations.clone())
            .unwrap_or_default()
    }
}

impl UserFeedback for RecordingFeedback {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        let Ok(mut state) = self.state.lock() else {
            return false;
        };
        state.prompts.push(prompt.clone());
        let default_answer = state.default_answer;
        state.scripted.pop_front().unwrap_or(default_answer)
    }

    fn notify(&self, notice: Notice) {
        if let Ok(mut state) = self.state.lock() {
            state.notices.push(notice);
        }
    }

    fn celebrate(&self, celebration: Celebration) {
        if let Ok(mut state) = self.state.lock() {
            state.celebrations.push(celebration);
        }
    }
}

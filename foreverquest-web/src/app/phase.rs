use crate::game::{QuizSession, Resume};

/// Top-level screen the app is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Failed,
    ResumePrompt,
    Quest,
}

impl Phase {
    /// Screen to show once the quest document has loaded.
    #[must_use]
    pub const fn after_boot(resume: &Resume) -> Self {
        match resume {
            Resume::Resumable(_) => Self::ResumePrompt,
            Resume::Fresh => Self::Quest,
        }
    }

    /// Whether the back/skip/next bar belongs on this screen.
    #[must_use]
    pub fn shows_navigation(self, session: Option<&QuizSession>) -> bool {
        self == Self::Quest && session.is_some_and(QuizSession::shows_navigation)
    }
}

/// Text announced to screen readers when a session lands on a new view.
#[must_use]
pub fn status_for(session: &QuizSession) -> String {
    use crate::game::View;
    match session.view() {
        View::Step(_) => session.progress().label(),
        View::Ending => String::from("Your ending is ready"),
        View::Confirmation => String::from("Confirmed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{QuestConfig, SessionState, Settings};
    use chrono::{TimeZone, Utc};

    #[test]
    fn boot_lands_on_prompt_only_with_saved_progress() {
        let now = Utc.with_ymd_and_hms(2026, 2, 14, 20, 0, 0).unwrap();
        let mut saved = SessionState::fresh(Settings::default(), now);
        saved.current_index = 2;
        assert_eq!(
            Phase::after_boot(&Resume::Resumable(saved)),
            Phase::ResumePrompt
        );
        assert_eq!(Phase::after_boot(&Resume::Fresh), Phase::Quest);
    }

    #[test]
    fn navigation_hidden_outside_quest_steps() {
        let now = Utc.with_ymd_and_hms(2026, 2, 14, 20, 0, 0).unwrap();
        let session = QuizSession::start(QuestConfig::bundled().unwrap(), Settings::default(), now);
        assert!(Phase::Quest.shows_navigation(Some(&session)));
        assert!(!Phase::ResumePrompt.shows_navigation(Some(&session)));
        assert!(!Phase::Quest.shows_navigation(None));
        assert!(status_for(&session).starts_with("Step 1"));
    }
}

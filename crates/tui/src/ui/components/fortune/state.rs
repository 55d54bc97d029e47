use fortune_types::FortuneReveal;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

/// What the fortune panel is currently showing.
#[derive(Debug)]
pub struct FortuneState {
    /// The last revealed fortune
    pub reveal: Option<FortuneReveal>,
    /// Failure text from the last request
    pub error: Option<String>,
    /// Soft warning such as backpressure
    pub notice: Option<String>,
    /// Focus flag for the clickable `#id`
    pub f_fortune_id: FocusFlag,
}

impl Default for FortuneState {
    fn default() -> Self {
        Self {
            reveal: None,
            error: None,
            notice: None,
            f_fortune_id: FocusFlag::named("fortune.id"),
        }
    }
}

impl FortuneState {
    pub fn clear(&mut self) {
        self.reveal = None;
        self.error = None;
        self.notice = None;
    }

    /// Whether a reveal, error or notice is on screen.
    pub fn has_outcome(&self) -> bool {
        self.reveal.is_some() || self.error.is_some() || self.notice.is_some()
    }

    /// Id of the revealed fortune, when the service sent one.
    pub fn revealed_id(&self) -> Option<i64> {
        self.reveal.as_ref().and_then(|reveal| reveal.id)
    }
}

impl HasFocus for FortuneState {
    fn build(&self, builder: &mut FocusBuilder) {
        if self.revealed_id().is_some() {
            builder.leaf_widget(&self.f_fortune_id);
        }
    }

    fn focus(&self) -> FocusFlag {
        self.f_fortune_id.clone()
    }

    fn area(&self) -> Rect {
        Rect::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fortune_types::CacheStatus;

    #[test]
    fn clear_drops_every_outcome() {
        let mut state = FortuneState {
            reveal: Some(FortuneReveal {
                message: "Read the error message.".into(),
                id: Some(9),
                request_ms: 12,
                cache_status: CacheStatus::Miss,
                server_delay_ms: None,
            }),
            error: Some("boom".into()),
            notice: Some("busy".into()),
            ..FortuneState::default()
        };
        assert!(state.has_outcome());
        assert_eq!(state.revealed_id(), Some(9));

        state.clear();
        assert!(!state.has_outcome());
        assert_eq!(state.revealed_id(), None);
    }
}

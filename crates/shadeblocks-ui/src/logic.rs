//! Pure view helpers extracted from components for non-wasm testing.

use shadeblocks_core::{Direction, PollTally, StepNavigator};

/// Horizontal distance, in pixels, that step content slides during a transition.
pub const SLIDE_DISTANCE_PX: i32 = 24;

/// Which action the primary footer button performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryAction {
    /// Advance to the next step.
    Continue,
    /// Hand the collected data to the submit handler.
    Submit,
}

/// Enabled/disabled state of the wizard footer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FooterState {
    /// Back button is disabled.
    pub back_disabled: bool,
    /// Action bound to the primary button.
    pub primary: PrimaryAction,
    /// Primary button is disabled.
    pub primary_disabled: bool,
}

/// Derive footer button state from the navigator.
#[must_use]
pub fn footer_state<T, C>(nav: &StepNavigator<T, C>, read_only: bool) -> FooterState {
    let primary = if nav.is_last() {
        PrimaryAction::Submit
    } else {
        PrimaryAction::Continue
    };
    let stranded = primary == PrimaryAction::Continue && !nav.has_next();
    FooterState {
        back_disabled: read_only || !nav.has_previous(),
        primary,
        primary_disabled: read_only || stranded || !nav.can_continue(),
    }
}

/// One segment of the dotted progress indicator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DotSegment {
    /// Step identifier, used as a render key.
    pub id: String,
    /// Label drawn under the segment.
    pub label: String,
    /// Segment is filled (at or before the current step).
    pub filled: bool,
}

/// Dotted progress segments, one per step.
#[must_use]
pub fn dot_segments<T, C>(nav: &StepNavigator<T, C>) -> Vec<DotSegment> {
    nav.steps()
        .iter()
        .enumerate()
        .map(|(idx, step)| DotSegment {
            id: step.id.clone(),
            label: step.label.clone().unwrap_or_default(),
            filled: idx <= nav.current_index(),
        })
        .collect()
}

/// Entry offset for incoming step content: forward enters from the right.
#[must_use]
pub fn slide_offset(direction: Direction) -> i32 {
    SLIDE_DISTANCE_PX * i32::from(direction.sign())
}

/// Render-ready state of one poll option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionView {
    /// Option identifier.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Rounded share of the total.
    pub percent: u32,
    /// Percentage text is visible.
    pub show_percent: bool,
    /// Fill bar is visible.
    pub show_bar: bool,
    /// Option is the voter's selection.
    pub selected: bool,
    /// Option button rejects input.
    pub disabled: bool,
}

/// View state for `option_id`, `None` when the poll has no such option.
#[must_use]
pub fn option_view(poll: &PollTally, option_id: &str) -> Option<OptionView> {
    let option = poll.option(option_id)?;
    let show_results = poll.show_results();
    Some(OptionView {
        id: option.id.clone(),
        label: option.label.clone(),
        percent: poll.percentage_of(&option.id),
        show_percent: show_results,
        show_bar: show_results && poll.total() > 0,
        selected: poll.is_selected(&option.id),
        disabled: !poll.options_enabled(),
    })
}

/// View state for every option in display order.
#[must_use]
pub fn option_views(poll: &PollTally) -> Vec<OptionView> {
    poll.options()
        .iter()
        .filter_map(|option| option_view(poll, &option.id))
        .collect()
}

/// Footer status line for a poll.
#[must_use]
pub fn vote_info(poll: &PollTally) -> String {
    if poll.has_voted() {
        format!("{} votes", poll.total())
    } else {
        "Tap an option to vote".to_string()
    }
}

/// Inline width style for a percentage fill.
#[must_use]
pub fn width_style(percent: u32) -> String {
    format!("width: {}%", percent.min(100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadeblocks_core::{PollOption, Step};

    fn poll() -> PollTally {
        PollTally::new(
            "demo",
            vec![
                PollOption::new("react", "React", 2),
                PollOption::new("vue", "Vue", 1),
                PollOption::new("svelte", "Svelte", 0),
            ],
        )
    }

    #[test]
    fn footer_switches_to_submit_on_last_step() -> anyhow::Result<()> {
        let steps = vec![Step::new("a"), Step::new("b")];
        let mut nav = StepNavigator::new(steps, ())?;
        let footer = footer_state(&nav, false);
        assert!(footer.back_disabled);
        assert_eq!(footer.primary, PrimaryAction::Continue);
        nav.next();
        let footer = footer_state(&nav, false);
        assert!(!footer.back_disabled);
        assert_eq!(footer.primary, PrimaryAction::Submit);
        Ok(())
    }

    #[test]
    fn footer_respects_validator_and_read_only() -> anyhow::Result<()> {
        let nav = StepNavigator::new(vec![Step::new("a"), Step::new("b")], 0_u8)?
            .with_validator(|value, _| *value > 0);
        assert!(footer_state(&nav, false).primary_disabled);
        let nav = StepNavigator::new(vec![Step::new("a")], 1_u8)?;
        let footer = footer_state(&nav, true);
        assert!(footer.primary_disabled);
        assert!(footer.back_disabled);
        Ok(())
    }

    #[test]
    fn continue_is_disabled_before_trailing_skipped_steps() -> anyhow::Result<()> {
        let steps = vec![Step::new("a"), Step::new("b"), Step::new("c").with_skip(true)];
        let mut nav = StepNavigator::new(steps, ())?;
        assert!(!footer_state(&nav, false).primary_disabled);
        nav.next();
        let footer = footer_state(&nav, false);
        assert_eq!(footer.primary, PrimaryAction::Continue);
        assert!(footer.primary_disabled);
        assert!(!footer.back_disabled);
        Ok(())
    }

    #[test]
    fn dots_fill_through_current_step() -> anyhow::Result<()> {
        let steps = vec![
            Step::new("a").with_label("Details"),
            Step::new("b"),
            Step::new("c"),
        ];
        let mut nav = StepNavigator::new(steps, ())?;
        nav.next();
        let filled: Vec<bool> = dot_segments(&nav).iter().map(|dot| dot.filled).collect();
        assert_eq!(filled, vec![true, true, false]);
        assert_eq!(dot_segments(&nav)[0].label, "Details");
        Ok(())
    }

    #[test]
    fn slide_offset_follows_direction() {
        assert_eq!(slide_offset(Direction::Forward), 24);
        assert_eq!(slide_offset(Direction::Backward), -24);
    }

    #[test]
    fn options_hide_results_until_vote() -> anyhow::Result<()> {
        let mut poll = poll();
        let views = option_views(&poll);
        assert!(views.iter().all(|view| !view.show_percent && !view.show_bar));
        assert_eq!(vote_info(&poll), "Tap an option to vote");
        poll.vote("svelte")?;
        let svelte = option_view(&poll, "svelte").expect("option exists");
        assert!(svelte.selected);
        assert!(svelte.show_percent);
        assert_eq!(svelte.percent, 25);
        assert!(svelte.disabled);
        assert_eq!(vote_info(&poll), "4 votes");
        Ok(())
    }

    #[test]
    fn empty_poll_never_draws_bars() {
        let poll = PollTally::new("empty", vec![PollOption::new("x", "X", 0)])
            .with_results_before_vote(true);
        let view = option_view(&poll, "x").expect("option exists");
        assert!(view.show_percent);
        assert!(!view.show_bar);
        assert_eq!(view.percent, 0);
    }

    #[test]
    fn width_style_is_capped() {
        assert_eq!(width_style(27), "width: 27%");
        assert_eq!(width_style(140), "width: 100%");
    }
}

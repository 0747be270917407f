//! Multi-step form navigation.
//!
//! # Design
//! - Skip-marked steps are filtered out of traversal by index predicate.
//! - Validation is caller-supplied and never consulted by `next`/`back`.
//! - Out-of-range and skip-marked jumps are rejected rather than clamped.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{WizardError, WizardResult};

/// Last navigation direction, used by renderers to pick a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Moving towards later steps.
    #[default]
    Forward,
    /// Moving towards earlier steps.
    Backward,
}

impl Direction {
    /// Signed offset for slide animations (`1` forward, `-1` backward).
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// One page of a wizard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step<C = ()> {
    /// Stable identifier, used as a render key.
    pub id: String,
    /// Optional human-readable label.
    pub label: Option<String>,
    /// Excluded from `next`/`back` traversal when set.
    pub skip: bool,
    /// Renderer-defined content.
    pub content: C,
}

impl Step<()> {
    /// Step without content.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_content(id, ())
    }
}

impl<C> Step<C> {
    /// Step carrying renderer content.
    #[must_use]
    pub fn with_content(id: impl Into<String>, content: C) -> Self {
        Self {
            id: id.into(),
            label: None,
            skip: false,
            content,
        }
    }

    /// Attach a label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the skip flag.
    #[must_use]
    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }
}

/// Step content that is either fixed or derived from the form data.
pub enum StepContent<V, T> {
    /// Content independent of the form data.
    Static(V),
    /// Content computed from the current form data.
    Derived(Rc<dyn Fn(&T) -> V>),
}

impl<V, T> StepContent<V, T> {
    /// Wrap a closure as derived content.
    #[must_use]
    pub fn derived(render: impl Fn(&T) -> V + 'static) -> Self {
        Self::Derived(Rc::new(render))
    }
}

impl<V: Clone, T> StepContent<V, T> {
    /// Produce the content for the given data.
    #[must_use]
    pub fn render(&self, data: &T) -> V {
        match self {
            Self::Static(value) => value.clone(),
            Self::Derived(render) => render(data),
        }
    }
}

impl<V: Clone, T> Clone for StepContent<V, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Static(value) => Self::Static(value.clone()),
            Self::Derived(render) => Self::Derived(Rc::clone(render)),
        }
    }
}

impl<V: PartialEq, T> PartialEq for StepContent<V, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Static(lhs), Self::Static(rhs)) => lhs == rhs,
            (Self::Derived(lhs), Self::Derived(rhs)) => Rc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl<V: fmt::Debug, T> fmt::Debug for StepContent<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Shallow merge of a partial record into form data.
pub trait MergeData {
    /// Overwrite the keys present in `patch`, keeping every other key.
    fn merge(&mut self, patch: Self);
}

impl MergeData for Map<String, Value> {
    fn merge(&mut self, patch: Self) {
        for (key, value) in patch {
            self.insert(key, value);
        }
    }
}

impl MergeData for Value {
    fn merge(&mut self, patch: Self) {
        match (self, patch) {
            (Self::Object(current), Self::Object(patch)) => current.merge(patch),
            (current, patch) => *current = patch,
        }
    }
}

impl<K: Ord, V> MergeData for BTreeMap<K, V> {
    fn merge(&mut self, patch: Self) {
        self.extend(patch);
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> MergeData for HashMap<K, V, S> {
    fn merge(&mut self, patch: Self) {
        self.extend(patch);
    }
}

type Validator<T> = Rc<dyn Fn(&T, usize) -> bool>;
type SubmitHandler<T> = Rc<dyn Fn(&T)>;

/// Step sequence state: current index, direction and collected data.
pub struct StepNavigator<T, C = ()> {
    steps: Vec<Step<C>>,
    current: usize,
    direction: Direction,
    data: T,
    validator: Option<Validator<T>>,
    on_submit: Option<SubmitHandler<T>>,
}

impl<T, C> StepNavigator<T, C> {
    /// Build a navigator positioned on the first non-skip step.
    ///
    /// # Errors
    /// Returns [`WizardError::NoSteps`] for an empty sequence and
    /// [`WizardError::NoReachableStep`] when every step is skip-marked.
    pub fn new(steps: Vec<Step<C>>, data: T) -> WizardResult<Self> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        let current = steps
            .iter()
            .position(|step| !step.skip)
            .ok_or(WizardError::NoReachableStep)?;
        Ok(Self {
            steps,
            current,
            direction: Direction::Forward,
            data,
            validator: None,
            on_submit: None,
        })
    }

    /// Navigator over a single step. The step's skip flag is cleared.
    #[must_use]
    pub fn single(step: Step<C>, data: T) -> Self {
        Self {
            steps: vec![step.with_skip(false)],
            current: 0,
            direction: Direction::Forward,
            data,
            validator: None,
            on_submit: None,
        }
    }

    /// Install the per-step validator consulted by [`Self::can_continue`].
    #[must_use]
    pub fn with_validator(mut self, validator: impl Fn(&T, usize) -> bool + 'static) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }

    /// Install the handler invoked by [`Self::submit`].
    #[must_use]
    pub fn with_submit(mut self, on_submit: impl Fn(&T) + 'static) -> Self {
        self.on_submit = Some(Rc::new(on_submit));
        self
    }

    /// All steps, including skip-marked ones.
    #[must_use]
    pub fn steps(&self) -> &[Step<C>] {
        &self.steps
    }

    /// Number of steps, including skip-marked ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; construction rejects empty sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the current step.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The current step.
    #[must_use]
    pub fn current_step(&self) -> &Step<C> {
        &self.steps[self.current]
    }

    /// Direction of the last move.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Collected form data.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    fn next_reachable(&self) -> Option<usize> {
        (self.current + 1..self.steps.len()).find(|&idx| !self.steps[idx].skip)
    }

    fn previous_reachable(&self) -> Option<usize> {
        (0..self.current).rev().find(|&idx| !self.steps[idx].skip)
    }

    /// Whether a later non-skip step exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next_reachable().is_some()
    }

    /// Whether an earlier non-skip step exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous_reachable().is_some()
    }

    /// No reachable step precedes the current one.
    #[must_use]
    pub fn is_first(&self) -> bool {
        !self.has_previous()
    }

    /// Current step is the final index of the sequence.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    /// Advance to the next non-skip step. Returns whether the index moved.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        let Some(target) = self.next_reachable() else {
            return false;
        };
        debug!(from = self.current, to = target, "wizard advanced");
        self.direction = Direction::Forward;
        self.current = target;
        true
    }

    /// Retreat to the previous non-skip step. Returns whether the index moved.
    pub fn back(&mut self) -> bool {
        let Some(target) = self.previous_reachable() else {
            return false;
        };
        debug!(from = self.current, to = target, "wizard retreated");
        self.direction = Direction::Backward;
        self.current = target;
        true
    }

    /// Jump directly to `index` without skip scanning or validation.
    ///
    /// # Errors
    /// Returns [`WizardError::StepOutOfRange`] for indices past the end and
    /// [`WizardError::SkippedStep`] for skip-marked targets.
    pub fn go_to(&mut self, index: usize) -> WizardResult<()> {
        let step = self.steps.get(index).ok_or(WizardError::StepOutOfRange {
            index,
            len: self.steps.len(),
        })?;
        if step.skip {
            return Err(WizardError::SkippedStep { index });
        }
        if index < self.current {
            self.direction = Direction::Backward;
        } else if index > self.current {
            self.direction = Direction::Forward;
        }
        debug!(from = self.current, to = index, "wizard jumped");
        self.current = index;
        Ok(())
    }

    /// Replace the form data.
    pub fn set_data(&mut self, data: T) {
        self.data = data;
    }

    /// Mutate the form data in place.
    pub fn update_data(&mut self, update: impl FnOnce(&mut T)) {
        update(&mut self.data);
    }

    /// Evaluate the validator for the current step; `true` when none is set.
    #[must_use]
    pub fn can_continue(&self) -> bool {
        self.validator
            .as_ref()
            .is_none_or(|validator| validator(&self.data, self.current))
    }

    /// Submission is conventionally enabled on the last step once valid.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_last() && self.can_continue()
    }

    /// Hand the collected data to the submit handler. Returns whether one ran.
    pub fn submit(&self) -> bool {
        let Some(on_submit) = self.on_submit.as_ref() else {
            return false;
        };
        debug!(step = self.current, "wizard submitted");
        on_submit(&self.data);
        true
    }

    /// Progress through the sequence as a percentage of all steps.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> f64 {
        ((self.current + 1) as f64 / self.steps.len() as f64) * 100.0
    }

    /// One-based position label such as `2/4`.
    #[must_use]
    pub fn position_label(&self) -> String {
        format!("{}/{}", self.current + 1, self.steps.len())
    }
}

impl<T: MergeData, C> StepNavigator<T, C> {
    /// Shallow-merge a partial record into the form data.
    pub fn merge_data(&mut self, patch: T) {
        self.data.merge(patch);
    }
}

impl<T, V: Clone> StepNavigator<T, StepContent<V, T>> {
    /// Render the current step's content against the current data.
    #[must_use]
    pub fn render_current(&self) -> V {
        self.current_step().content.render(&self.data)
    }
}

impl<T: Clone, C: Clone> Clone for StepNavigator<T, C> {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
            current: self.current,
            direction: self.direction,
            data: self.data.clone(),
            validator: self.validator.clone(),
            on_submit: self.on_submit.clone(),
        }
    }
}

impl<T: PartialEq, C: PartialEq> PartialEq for StepNavigator<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
            && self.direction == other.direction
            && self.data == other.data
            && self.steps == other.steps
    }
}

impl<T: fmt::Debug, C: fmt::Debug> fmt::Debug for StepNavigator<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepNavigator")
            .field("steps", &self.steps)
            .field("current", &self.current)
            .field("direction", &self.direction)
            .field("data", &self.data)
            .field("validator", &self.validator.is_some())
            .field("on_submit", &self.on_submit.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    fn plain(ids: &[(&str, bool)]) -> Vec<Step> {
        ids.iter()
            .map(|(id, skip)| Step::new(*id).with_skip(*skip))
            .collect()
    }

    #[test]
    fn next_skips_marked_steps_and_back_returns() -> anyhow::Result<()> {
        let steps = plain(&[("a", false), ("b", false), ("c", true), ("d", false)]);
        let mut nav = StepNavigator::new(steps, ())?;
        nav.go_to(1)?;
        assert!(nav.next());
        assert_eq!(nav.current_index(), 3);
        assert_eq!(nav.direction(), Direction::Forward);
        assert!(nav.back());
        assert_eq!(nav.current_index(), 1);
        assert_eq!(nav.direction(), Direction::Backward);
        Ok(())
    }

    #[test]
    fn trailing_skips_leave_next_as_noop() -> anyhow::Result<()> {
        let steps = plain(&[("a", false), ("b", false), ("c", true)]);
        let mut nav = StepNavigator::new(steps, ())?;
        assert!(nav.next());
        assert!(!nav.next());
        assert_eq!(nav.current_index(), 1);
        assert!(!nav.has_next());
        assert!(!nav.is_last());
        Ok(())
    }

    #[test]
    fn construction_starts_on_first_reachable_step() -> anyhow::Result<()> {
        let mut nav = StepNavigator::new(
            plain(&[("a", true), ("b", false), ("c", false)]),
            (),
        )?;
        assert_eq!(nav.current_index(), 1);
        assert!(!nav.has_previous());
        assert!(nav.is_first());
        assert!(nav.next());
        assert!(!nav.is_first());
        Ok(())
    }

    #[test]
    fn construction_rejects_empty_and_unreachable() {
        let empty: Vec<Step> = Vec::new();
        assert_eq!(
            StepNavigator::new(empty, ()).err(),
            Some(WizardError::NoSteps)
        );
        assert_eq!(
            StepNavigator::new(plain(&[("a", true)]), ()).err(),
            Some(WizardError::NoReachableStep)
        );
    }

    #[test]
    fn go_to_rejects_out_of_range_and_skipped() -> anyhow::Result<()> {
        let mut nav = StepNavigator::new(plain(&[("a", false), ("b", true)]), ())?;
        assert_eq!(
            nav.go_to(5),
            Err(WizardError::StepOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(nav.go_to(1), Err(WizardError::SkippedStep { index: 1 }));
        assert_eq!(nav.current_index(), 0);
        Ok(())
    }

    #[test]
    fn go_to_sets_direction_from_relative_position() -> anyhow::Result<()> {
        let mut nav = StepNavigator::new(
            plain(&[("a", false), ("b", false), ("c", false), ("d", false)]),
            (),
        )?;
        nav.go_to(3)?;
        assert_eq!(nav.direction(), Direction::Forward);
        nav.go_to(1)?;
        assert_eq!(nav.direction(), Direction::Backward);
        assert_eq!(nav.current_index(), 1);
        nav.go_to(1)?;
        assert_eq!(nav.direction(), Direction::Backward);
        nav.go_to(2)?;
        assert_eq!(nav.direction(), Direction::Forward);
        Ok(())
    }

    #[test]
    fn validator_gates_can_continue_but_not_next() -> anyhow::Result<()> {
        let mut nav = StepNavigator::new(plain(&[("a", false), ("b", false)]), json!({}))
            .map(|nav| nav.with_validator(|data: &Value, _| data.get("name").is_some()))?;
        assert!(!nav.can_continue());
        assert!(nav.next());
        nav.merge_data(json!({ "name": "Ada" }));
        assert!(nav.can_continue());
        assert!(nav.can_submit());
        Ok(())
    }

    #[test]
    fn merge_data_keeps_untouched_keys() -> anyhow::Result<()> {
        let mut nav = StepNavigator::new(
            plain(&[("a", false)]),
            json!({ "name": "", "newsletter": true }),
        )?;
        nav.merge_data(json!({ "name": "Ada" }));
        assert_eq!(nav.data(), &json!({ "name": "Ada", "newsletter": true }));
        nav.update_data(|data| data["newsletter"] = json!(false));
        assert_eq!(nav.data()["newsletter"], json!(false));
        Ok(())
    }

    #[test]
    fn submit_hands_data_to_handler() -> anyhow::Result<()> {
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        let nav = StepNavigator::new(plain(&[("a", false)]), 7_u32)?
            .with_submit(move |data| *sink.borrow_mut() = Some(*data));
        assert!(nav.submit());
        assert_eq!(*seen.borrow(), Some(7));
        Ok(())
    }

    #[test]
    fn single_step_navigator_is_always_reachable() {
        let mut nav = StepNavigator::single(Step::new("only").with_skip(true), ());
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.current_step().skip);
        assert!(!nav.next());
        assert!(nav.is_last());
    }

    #[test]
    fn submit_without_handler_reports_false() -> anyhow::Result<()> {
        let nav = StepNavigator::new(plain(&[("a", false)]), ())?;
        assert!(!nav.submit());
        Ok(())
    }

    #[test]
    fn progress_and_position_follow_index() -> anyhow::Result<()> {
        let mut nav = StepNavigator::new(
            plain(&[("a", false), ("b", false), ("c", false), ("d", false)]),
            (),
        )?;
        assert!((nav.progress_percent() - 25.0).abs() < f64::EPSILON);
        assert_eq!(nav.position_label(), "1/4");
        nav.go_to(3)?;
        assert!((nav.progress_percent() - 100.0).abs() < f64::EPSILON);
        assert_eq!(nav.position_label(), "4/4");
        Ok(())
    }

    #[test]
    fn derived_content_sees_current_data() -> anyhow::Result<()> {
        let steps = vec![
            Step::with_content("intro", StepContent::Static("hello".to_string())),
            Step::with_content(
                "review",
                StepContent::derived(|name: &String| format!("review {name}")),
            ),
        ];
        let mut nav = StepNavigator::new(steps, "Ada".to_string())?;
        assert_eq!(nav.render_current(), "hello");
        nav.next();
        assert_eq!(nav.render_current(), "review Ada");
        Ok(())
    }
}

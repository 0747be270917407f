//! Multi-step form component and its composable pieces.
//!
//! # Design
//! - Navigation state lives in a reducer; step content receives an explicit
//!   [`WizardHandle`] instead of reaching for an ambient context.
//! - Button gating comes from `logic::footer_state` so it stays testable natively.

use std::rc::Rc;

use gloo::console;
use shadeblocks_core::{ProgressStyle, Step, StepContent, StepNavigator, WizardConfig, WizardError};
use yew::prelude::*;

use crate::logic::{PrimaryAction, dot_segments, footer_state, slide_offset, width_style};

/// Form data carried by a wizard.
pub trait FormData: Clone + PartialEq + 'static {}

impl<T: Clone + PartialEq + 'static> FormData for T {}

/// Step content rendered against the wizard handle.
pub type StepBody<T> = StepContent<Html, WizardHandle<T>>;

/// Reducer actions for the wizard.
pub enum WizardAction<T> {
    /// Advance past skip-marked steps.
    Next,
    /// Retreat past skip-marked steps.
    Back,
    /// Jump to an index.
    GoTo(usize),
    /// Replace the form data.
    Replace(T),
    /// Mutate the form data in place.
    Update(Box<dyn FnOnce(&mut T)>),
}

/// Reducer state wrapping the step navigator.
#[derive(Clone, PartialEq)]
pub struct WizardState<T: FormData> {
    nav: StepNavigator<T, StepBody<T>>,
}

impl<T: FormData> WizardState<T> {
    fn build(
        steps: Vec<Step<StepBody<T>>>,
        data: T,
        can_continue: Option<Callback<(T, usize), bool>>,
        on_submit: Option<Callback<T>>,
    ) -> Self {
        let mut nav = StepNavigator::new(steps, data.clone())
            .unwrap_or_else(|err| StepNavigator::single(misconfigured_step(&err), data));
        if let Some(can_continue) = can_continue {
            nav = nav.with_validator(move |data: &T, step| can_continue.emit((data.clone(), step)));
        }
        if let Some(on_submit) = on_submit {
            nav = nav.with_submit(move |data: &T| on_submit.emit(data.clone()));
        }
        Self { nav }
    }
}

fn misconfigured_step<T: FormData>(err: &WizardError) -> Step<StepBody<T>> {
    console::error!("multi-step form misconfigured", err.to_string());
    Step::with_content(
        "misconfigured",
        StepContent::Static(html! {
            <div role="alert" class="alert alert-error">{"This form has no steps to show."}</div>
        }),
    )
}

impl<T: FormData> Reducible for WizardState<T> {
    type Action = WizardAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut nav = self.nav.clone();
        match action {
            WizardAction::Next => {
                if !nav.next() {
                    return self;
                }
            }
            WizardAction::Back => {
                if !nav.back() {
                    return self;
                }
            }
            WizardAction::GoTo(index) => {
                if let Err(err) = nav.go_to(index) {
                    console::error!("wizard jump rejected", err.to_string());
                    return self;
                }
            }
            WizardAction::Replace(data) => nav.set_data(data),
            WizardAction::Update(update) => nav.update_data(update),
        }
        Rc::new(Self { nav })
    }
}

/// Explicit handle to a mounted wizard, passed to step content and subcomponents.
#[derive(Clone)]
pub struct WizardHandle<T: FormData> {
    state: UseReducerHandle<WizardState<T>>,
}

impl<T: FormData> PartialEq for WizardHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        *self.state == *other.state
    }
}

impl<T: FormData> WizardHandle<T> {
    /// Underlying navigator.
    #[must_use]
    pub fn navigator(&self) -> &StepNavigator<T, StepBody<T>> {
        &self.state.nav
    }

    /// Current form data.
    #[must_use]
    pub fn data(&self) -> &T {
        self.state.nav.data()
    }

    /// Advance to the next reachable step.
    pub fn next(&self) {
        self.state.dispatch(WizardAction::Next);
    }

    /// Retreat to the previous reachable step.
    pub fn back(&self) {
        self.state.dispatch(WizardAction::Back);
    }

    /// Jump to `index`; rejected jumps are logged and ignored.
    pub fn go_to(&self, index: usize) {
        self.state.dispatch(WizardAction::GoTo(index));
    }

    /// Replace the form data.
    pub fn set_data(&self, data: T) {
        self.state.dispatch(WizardAction::Replace(data));
    }

    /// Mutate the form data in place.
    pub fn update(&self, update: impl FnOnce(&mut T) + 'static) {
        self.state.dispatch(WizardAction::Update(Box::new(update)));
    }

    /// Hand the collected data to the submit callback.
    pub fn submit(&self) {
        self.state.nav.submit();
    }
}

/// Properties for [`MultiStepForm`].
#[derive(Properties, PartialEq)]
pub struct MultiStepFormProps<T: FormData> {
    /// Ordered steps; skip-marked steps are passed over.
    pub steps: Vec<Step<StepBody<T>>>,
    /// Data the form starts with.
    pub initial_data: T,
    /// Labels, progress style and read-only flag.
    #[prop_or_default]
    pub config: WizardConfig,
    /// Per-step validator gating Continue/Submit.
    #[prop_or_default]
    pub can_continue: Option<Callback<(T, usize), bool>>,
    /// Receives the data on submit.
    #[prop_or_default]
    pub on_submit: Option<Callback<T>>,
    /// Extra classes for the card.
    #[prop_or_default]
    pub class: Classes,
}

/// Card-style wizard with progress, animated content and navigation footer.
#[function_component(MultiStepForm)]
pub fn multi_step_form<T>(props: &MultiStepFormProps<T>) -> Html
where
    T: FormData,
{
    let state = {
        let steps = props.steps.clone();
        let data = props.initial_data.clone();
        let can_continue = props.can_continue.clone();
        let on_submit = props.on_submit.clone();
        use_reducer(move || WizardState::build(steps, data, can_continue, on_submit))
    };
    let wizard = WizardHandle {
        state: state.clone(),
    };
    let nav = &state.nav;
    let config = &props.config;
    let footer = footer_state(nav, config.read_only);
    let step = nav.current_step();

    let on_back = {
        let wizard = wizard.clone();
        Callback::from(move |_: MouseEvent| wizard.back())
    };
    let on_primary = {
        let wizard = wizard.clone();
        let primary = footer.primary;
        Callback::from(move |_: MouseEvent| match primary {
            PrimaryAction::Continue => wizard.next(),
            PrimaryAction::Submit => wizard.submit(),
        })
    };
    let primary_label = match footer.primary {
        PrimaryAction::Continue => config.continue_label.clone(),
        PrimaryAction::Submit => config.submit_label.clone(),
    };
    let progress = if config.show_progress {
        html! { <WizardProgress<T> wizard={wizard.clone()} style={config.progress_style} /> }
    } else {
        Html::default()
    };
    let enter_style = format!("--step-enter-offset: {}px", slide_offset(nav.direction()));

    html! {
        <div class={classes!("card", "w-full", "max-w-2xl", "mx-auto", "bg-base-100", "shadow-sm", props.class.clone())}>
            <MultiStepFormHeader title={config.heading.clone()} position={nav.position_label()}>
                {progress}
            </MultiStepFormHeader>
            <MultiStepFormContent>
                <div key={step.id.clone()} class="step-enter space-y-4" style={enter_style}>
                    {step.content.render(&wizard)}
                </div>
            </MultiStepFormContent>
            <MultiStepFormFooter class="flex items-center justify-between gap-2">
                <button class="btn btn-ghost" onclick={on_back} disabled={footer.back_disabled}>
                    {config.back_label.clone()}
                </button>
                <button class="btn btn-primary" onclick={on_primary} disabled={footer.primary_disabled}>
                    {primary_label}
                </button>
            </MultiStepFormFooter>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct WizardProgressProps<T: FormData> {
    wizard: WizardHandle<T>,
    style: ProgressStyle,
}

#[function_component(WizardProgress)]
fn wizard_progress<T>(props: &WizardProgressProps<T>) -> Html
where
    T: FormData,
{
    let nav = props.wizard.navigator();
    match props.style {
        ProgressStyle::Line => html! {
            <progress
                class="progress progress-primary h-2 w-full"
                value={nav.progress_percent().to_string()}
                max="100"
            />
        },
        ProgressStyle::Dots => html! {
            <div class="flex w-full items-center gap-3">
                {for dot_segments(nav).into_iter().map(|dot| {
                    let fill = width_style(if dot.filled { 100 } else { 0 });
                    html! {
                        <div key={dot.id} class="flex-1">
                            <div class="h-1.5 rounded-full bg-base-300 overflow-hidden">
                                <div class="h-full bg-primary transition-all duration-300" style={fill} />
                            </div>
                            <div class="mt-1 text-[11px] opacity-70 truncate">{dot.label}</div>
                        </div>
                    }
                })}
            </div>
        },
    }
}

/// Properties for [`MultiStepFormHeader`].
#[derive(Properties, PartialEq)]
pub struct MultiStepFormHeaderProps {
    /// Small heading above the progress indicator.
    #[prop_or_default]
    pub title: AttrValue,
    /// Position label such as `2/4`.
    #[prop_or_default]
    pub position: AttrValue,
    /// Progress indicator or other header content.
    #[prop_or_default]
    pub children: Children,
    /// Extra classes.
    #[prop_or_default]
    pub class: Classes,
}

/// Header row with heading, slot content and step counter.
#[function_component(MultiStepFormHeader)]
pub fn multi_step_form_header(props: &MultiStepFormHeaderProps) -> Html {
    html! {
        <div class={classes!("px-6", "pt-6", props.class.clone())}>
            <div class="flex w-full items-start justify-between gap-3">
                <div class="flex w-full flex-col gap-2">
                    <span class="text-xs opacity-70">{props.title.clone()}</span>
                    { for props.children.iter() }
                </div>
                <span class="text-xs tabular-nums opacity-70">{props.position.clone()}</span>
            </div>
        </div>
    }
}

/// Properties for [`MultiStepFormContent`] and [`MultiStepFormFooter`].
#[derive(Properties, PartialEq)]
pub struct SlotProps {
    /// Slot content.
    #[prop_or_default]
    pub children: Children,
    /// Extra classes.
    #[prop_or_default]
    pub class: Classes,
}

/// Content area with a stable minimum height.
#[function_component(MultiStepFormContent)]
pub fn multi_step_form_content(props: &SlotProps) -> Html {
    html! {
        <div class={classes!("card-body", props.class.clone())}>
            <div class="relative min-h-[200px]">
                { for props.children.iter() }
            </div>
        </div>
    }
}

/// Footer row for navigation buttons.
#[function_component(MultiStepFormFooter)]
pub fn multi_step_form_footer(props: &SlotProps) -> Html {
    html! {
        <div class={classes!("card-actions", "px-6", "pb-6", props.class.clone())}>
            { for props.children.iter() }
        </div>
    }
}

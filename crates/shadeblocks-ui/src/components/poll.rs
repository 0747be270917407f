//! Composable poll component.
//!
//! # Design
//! - Subcomponents take an explicit [`PollHandle`]; nothing is looked up ambiently.
//! - Visibility and enablement come from `logic::option_view`.

use std::rc::Rc;

use gloo::console;
use shadeblocks_core::{
    PollConfig, PollOption, PollOptionConfig, PollTally, ResetOutcome, VoteOutcome,
};
use yew::prelude::*;

use crate::logic::{option_view, vote_info, width_style};
use crate::storage::BrowserStore;

/// Reducer actions for a poll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollAction {
    /// Vote for an option id.
    Vote(String),
    /// Reset, or delegate the reset to the host.
    Reset,
}

/// Reducer state wrapping the tally.
#[derive(Clone, Debug, PartialEq)]
pub struct PollState {
    tally: PollTally,
}

impl PollState {
    /// Build the tally for `config`, wiring the reset hook and optional persistence.
    #[must_use]
    pub fn build(config: &PollConfig, on_reset: Option<Callback<()>>, persist: bool) -> Self {
        if let Err(err) = config.validate() {
            console::error!("poll misconfigured", err.to_string());
        }
        let mut tally = config.build_tally();
        if let Some(on_reset) = on_reset {
            tally = tally.with_reset_hook(move || on_reset.emit(()));
        }
        if persist {
            tally = tally.persisted(Rc::new(BrowserStore));
        }
        Self { tally }
    }
}

impl Reducible for PollState {
    type Action = PollAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut tally = self.tally.clone();
        match action {
            PollAction::Vote(option_id) => match tally.vote(&option_id) {
                Ok(VoteOutcome::Recorded) => {}
                Ok(VoteOutcome::AlreadyVoted | VoteOutcome::ReadOnly) => return self,
                Err(err) => {
                    console::error!("poll vote rejected", err.to_string(), option_id);
                    return self;
                }
            },
            PollAction::Reset => {
                if tally.reset() == ResetOutcome::Delegated {
                    return self;
                }
            }
        }
        Rc::new(Self { tally })
    }
}

/// Explicit handle to a mounted poll.
#[derive(Clone)]
pub struct PollHandle {
    state: UseReducerHandle<PollState>,
}

impl PartialEq for PollHandle {
    fn eq(&self, other: &Self) -> bool {
        *self.state == *other.state
    }
}

impl PollHandle {
    pub(crate) fn new(state: UseReducerHandle<PollState>) -> Self {
        Self { state }
    }

    /// Current tally.
    #[must_use]
    pub fn tally(&self) -> &PollTally {
        &self.state.tally
    }

    /// Vote for `option_id`.
    pub fn vote(&self, option_id: impl Into<String>) {
        self.state.dispatch(PollAction::Vote(option_id.into()));
    }

    /// Reset the poll, or run the host's reset callback when one is set.
    pub fn reset(&self) {
        self.state.dispatch(PollAction::Reset);
    }
}

/// Properties for [`Poll`].
#[derive(Properties, PartialEq)]
pub struct PollProps {
    /// Poll identifier.
    pub id: AttrValue,
    /// Options in display order with starting counts.
    pub options: Vec<PollOption>,
    /// Allow additional votes after the first.
    #[prop_or_default]
    pub allow_revote: bool,
    /// Show percentages before voting.
    #[prop_or_default]
    pub show_results_before_vote: bool,
    /// Ignore every vote.
    #[prop_or_default]
    pub read_only: bool,
    /// Persist the voter's state in `localStorage`.
    #[prop_or_default]
    pub persist: bool,
    /// Host reset hook; replaces the built-in reset when set.
    #[prop_or_default]
    pub on_reset: Option<Callback<()>>,
    /// Title drawn above the options.
    #[prop_or_default]
    pub title: Option<AttrValue>,
    /// Description drawn under the title.
    #[prop_or_default]
    pub description: Option<AttrValue>,
    /// Custom body; the default option list is drawn when absent.
    #[prop_or_default]
    pub body: Option<Callback<PollHandle, Html>>,
    /// Footer drawn under the body.
    #[prop_or_default]
    pub footer: Option<Callback<PollHandle, Html>>,
    /// Extra classes.
    #[prop_or_default]
    pub class: Classes,
}

impl PollProps {
    fn config(&self) -> PollConfig {
        PollConfig {
            id: self.id.to_string(),
            title: self.title.as_ref().map(|title| title.to_string()),
            description: self.description.as_ref().map(|text| text.to_string()),
            options: self
                .options
                .iter()
                .map(|option| PollOptionConfig {
                    id: option.id.clone(),
                    label: option.label.clone(),
                    votes: option.votes,
                })
                .collect(),
            allow_revote: self.allow_revote,
            show_results_before_vote: self.show_results_before_vote,
            read_only: self.read_only,
        }
    }
}

/// Poll root: owns the tally and renders body and footer slots.
#[function_component(Poll)]
pub fn poll(props: &PollProps) -> Html {
    let state = {
        let config = props.config();
        let on_reset = props.on_reset.clone();
        let persist = props.persist;
        use_reducer(move || PollState::build(&config, on_reset, persist))
    };
    let handle = PollHandle::new(state);
    let header = (props.title.is_some() || props.description.is_some()).then(|| {
        html! {
            <PollHeader>
                {props.title.clone().map(|title| html! { <PollTitle>{title}</PollTitle> }).unwrap_or_default()}
                {props.description.clone().map(|text| html! { <PollDescription>{text}</PollDescription> }).unwrap_or_default()}
            </PollHeader>
        }
    });
    let body = props.body.as_ref().map_or_else(
        || html! { <PollOptions poll={handle.clone()} /> },
        |body| body.emit(handle.clone()),
    );
    let footer = props
        .footer
        .as_ref()
        .map(|footer| footer.emit(handle.clone()));

    html! {
        <div class={classes!("w-full", "max-w-xl", "mx-auto", "rounded-2xl", "border", "bg-base-100", "p-6", "shadow-sm", props.class.clone())}>
            {header.unwrap_or_default()}
            {body}
            {footer.map(|footer| html! { <div class="fade-in">{footer}</div> }).unwrap_or_default()}
        </div>
    }
}

/// Properties for slot-only subcomponents.
#[derive(Properties, PartialEq)]
pub struct PollSlotProps {
    /// Slot content.
    #[prop_or_default]
    pub children: Children,
    /// Extra classes.
    #[prop_or_default]
    pub class: Classes,
}

/// Wrapper for title and description.
#[function_component(PollHeader)]
pub fn poll_header(props: &PollSlotProps) -> Html {
    html! { <div class={classes!("mb-4", "space-y-1", props.class.clone())}>{ for props.children.iter() }</div> }
}

/// Poll question.
#[function_component(PollTitle)]
pub fn poll_title(props: &PollSlotProps) -> Html {
    html! { <h3 class={classes!("text-lg", "font-semibold", "leading-none", props.class.clone())}>{ for props.children.iter() }</h3> }
}

/// Supporting text under the question.
#[function_component(PollDescription)]
pub fn poll_description(props: &PollSlotProps) -> Html {
    html! { <p class={classes!("text-sm", "opacity-70", "leading-snug", props.class.clone())}>{ for props.children.iter() }</p> }
}

/// Row wrapper for footer items.
#[function_component(PollFooter)]
pub fn poll_footer(props: &PollSlotProps) -> Html {
    html! { <div class={classes!("mt-4", "flex", "items-center", "justify-between", props.class.clone())}>{ for props.children.iter() }</div> }
}

/// Properties for [`PollOptions`].
#[derive(Properties, PartialEq)]
pub struct PollOptionsProps {
    /// Poll the options belong to.
    pub poll: PollHandle,
    /// Custom option buttons; one [`PollOption`] per option when empty.
    #[prop_or_default]
    pub children: Children,
    /// Extra classes.
    #[prop_or_default]
    pub class: Classes,
}

/// Option list, either caller-supplied or generated from the tally.
#[function_component(PollOptions)]
pub fn poll_options(props: &PollOptionsProps) -> Html {
    let classes = classes!("space-y-2", props.class.clone());
    if !props.children.is_empty() {
        return html! { <div class={classes}>{ for props.children.iter() }</div> };
    }
    html! {
        <div class={classes}>
            {for props.poll.tally().options().iter().map(|option| html! {
                <PollOptionButton key={option.id.clone()} poll={props.poll.clone()} id={option.id.clone()}>
                    {option.label.clone()}
                </PollOptionButton>
            })}
        </div>
    }
}

/// Properties for [`PollOptionButton`].
#[derive(Properties, PartialEq)]
pub struct PollOptionButtonProps {
    /// Poll the option belongs to.
    pub poll: PollHandle,
    /// Option identifier.
    pub id: AttrValue,
    /// Option label content.
    #[prop_or_default]
    pub children: Children,
    /// Extra classes.
    #[prop_or_default]
    pub class: Classes,
}

/// Vote button with percentage and proportional fill.
#[function_component(PollOptionButton)]
pub fn poll_option_button(props: &PollOptionButtonProps) -> Html {
    let Some(view) = option_view(props.poll.tally(), &props.id) else {
        console::error!("poll option not found", props.id.to_string());
        return Html::default();
    };
    let onclick = {
        let poll = props.poll.clone();
        let id = view.id.clone();
        Callback::from(move |_: MouseEvent| poll.vote(id.clone()))
    };
    let classes = classes!(
        "relative",
        "w-full",
        "rounded-xl",
        "border",
        "p-3",
        "text-left",
        "transition-colors",
        "hover:bg-base-200",
        props.class.clone(),
        view.selected.then_some("border-primary bg-primary/5"),
    );
    html! {
        <button class={classes} onclick={onclick} disabled={view.disabled} aria-pressed={view.selected.to_string()}>
            <div class="relative z-10 flex items-center justify-between gap-3">
                <span class="font-medium">{ for props.children.iter() }</span>
                {view.show_percent.then(|| html! {
                    <span class="text-sm tabular-nums opacity-70">{format!("{}%", view.percent)}</span>
                }).unwrap_or_default()}
            </div>
            <div class="pointer-events-none absolute inset-0 overflow-hidden rounded-xl">
                {view.show_bar.then(|| html! {
                    <div class="absolute inset-y-0 left-0 bg-primary/15 transition-all duration-300" style={width_style(view.percent)} />
                }).unwrap_or_default()}
            </div>
        </button>
    }
}

/// Properties for handle-only subcomponents.
#[derive(Properties, PartialEq)]
pub struct PollHandleProps {
    /// Poll to read from.
    pub poll: PollHandle,
    /// Optional replacement content.
    #[prop_or_default]
    pub children: Children,
}

/// Total votes once voted, a prompt otherwise.
#[function_component(PollVoteInfo)]
pub fn poll_vote_info(props: &PollHandleProps) -> Html {
    let tally = props.poll.tally();
    let class = if tally.has_voted() {
        "text-sm opacity-70 tabular-nums"
    } else {
        "text-sm opacity-70"
    };
    html! { <div class={class}>{vote_info(tally)}</div> }
}

/// Reset button, drawn only after a vote.
#[function_component(PollReset)]
pub fn poll_reset(props: &PollHandleProps) -> Html {
    if !props.poll.tally().has_voted() {
        return Html::default();
    }
    let onclick = {
        let poll = props.poll.clone();
        Callback::from(move |_: MouseEvent| poll.reset())
    };
    let label = if props.children.is_empty() {
        html! { "Reset Poll" }
    } else {
        html! { <>{ for props.children.iter() }</> }
    };
    html! { <button class="btn btn-sm btn-outline" onclick={onclick}>{label}</button> }
}

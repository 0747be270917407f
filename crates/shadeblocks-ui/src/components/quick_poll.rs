//! Self-contained card poll that remembers the local vote.

use shadeblocks_core::PollConfig;
use yew::prelude::*;

use crate::components::poll::{PollHandle, PollOptionButton, PollState, PollVoteInfo};

/// Properties for [`QuickPollBlock`].
#[derive(Properties, PartialEq)]
pub struct QuickPollBlockProps {
    /// Poll definition; `title` is used as the question.
    pub config: PollConfig,
    /// Host reset hook; replaces the built-in reset when set.
    #[prop_or_default]
    pub on_reset: Option<Callback<()>>,
    /// Extra classes for the card.
    #[prop_or_default]
    pub class: Classes,
}

/// Card poll persisted under `quickpoll:<id>`.
#[function_component(QuickPollBlock)]
pub fn quick_poll_block(props: &QuickPollBlockProps) -> Html {
    let state = {
        let config = props.config.clone();
        let on_reset = props.on_reset.clone();
        use_reducer(move || PollState::build(&config, on_reset, true))
    };
    let poll = PollHandle::new(state);
    let tally = poll.tally();
    let on_reset = {
        let poll = poll.clone();
        Callback::from(move |_: MouseEvent| poll.reset())
    };

    html! {
        <div class={classes!("card", "w-full", "max-w-xl", "mx-auto", "bg-base-100", "shadow-sm", props.class.clone())}>
            <div class="px-6 pt-6 space-y-2">
                <div class="flex items-center justify-between">
                    <h3 class="font-semibold leading-none tracking-tight">
                        {props.config.title.clone().unwrap_or_default()}
                    </h3>
                    <span class="badge badge-outline rounded-2xl">{"Quick Poll"}</span>
                </div>
                {props.config.description.clone().map(|text| html! {
                    <p class="text-sm opacity-70">{text}</p>
                }).unwrap_or_default()}
            </div>
            <div class="card-body space-y-4">
                <div class="grid gap-2">
                    {for tally.options().iter().map(|option| html! {
                        <PollOptionButton key={option.id.clone()} poll={poll.clone()} id={option.id.clone()}>
                            {option.label.clone()}
                        </PollOptionButton>
                    })}
                </div>
                <PollVoteInfo poll={poll.clone()} />
            </div>
            <div class="card-actions items-center justify-between px-6 pb-6">
                {tally.has_voted().then(|| html! {
                    <span class="fade-in inline-flex items-center gap-1 text-sm opacity-70">
                        <span class="text-base">{"🎉"}</span>{" Thanks for voting!"}
                    </span>
                }).unwrap_or_default()}
                <button class="btn btn-ghost btn-sm" onclick={on_reset} disabled={!tally.has_voted()}>
                    {"Reset poll"}
                </button>
            </div>
        </div>
    }
}

//! Showcase page mounting the wizard and poll widgets.

use gloo::console;
use serde::Serialize;
use shadeblocks_core::{
    PollConfig, PollOption, PollOptionConfig, ProgressStyle, SnapshotStore, Step, StepContent,
    WizardConfig, snapshot_key,
};
use yew::prelude::*;

use crate::components::{
    MultiStepForm, Poll, PollDescription, PollFooter, PollHandle, PollHeader, PollOptions,
    PollReset, PollTitle, PollVoteInfo, QuickPollBlock, StepBody, WizardHandle,
};
use crate::storage::BrowserStore;

const QUICK_POLL_ID: &str = "demo-poll";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
enum Budget {
    Under1k,
    From1kTo5k,
    Over5k,
    Undecided,
}

impl Budget {
    const ALL: [Self; 4] = [Self::Under1k, Self::From1kTo5k, Self::Over5k, Self::Undecided];

    const fn label(self) -> &'static str {
        match self {
            Self::Under1k => "<$1k",
            Self::From1kTo5k => "$1k–$5k",
            Self::Over5k => ">$5k",
            Self::Undecided => "Undecided",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
struct SignupForm {
    name: String,
    email: String,
    project_name: String,
    project_desc: String,
    newsletter: bool,
    budget: Budget,
}

impl Default for SignupForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            project_name: String::new(),
            project_desc: String::new(),
            newsletter: true,
            budget: Budget::Undecided,
        }
    }
}

fn step_is_valid(data: &SignupForm, step: usize) -> bool {
    match step {
        0 => !data.name.trim().is_empty() && data.email.contains('@'),
        1 => !data.project_name.trim().is_empty(),
        _ => true,
    }
}

#[derive(Properties, PartialEq)]
struct StepProps {
    wizard: WizardHandle<SignupForm>,
}

fn text_input(
    wizard: &WizardHandle<SignupForm>,
    apply: fn(&mut SignupForm, String),
) -> Callback<InputEvent> {
    let wizard = wizard.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
            let value = input.value();
            wizard.update(move |data| apply(data, value));
        }
    })
}

#[function_component(DetailsStep)]
fn details_step(props: &StepProps) -> Html {
    let data = props.wizard.data();
    html! {
        <div class="grid grid-cols-1 gap-5 md:grid-cols-2">
            <label class="form-control gap-2">
                <span class="label-text">{"Full name"}</span>
                <input class="input input-bordered" value={data.name.clone()} placeholder="Ada Lovelace"
                    oninput={text_input(&props.wizard, |data, value| data.name = value)} />
            </label>
            <label class="form-control gap-2">
                <span class="label-text">{"Email"}</span>
                <input class="input input-bordered" type="email" value={data.email.clone()} placeholder="ada@example.com"
                    oninput={text_input(&props.wizard, |data, value| data.email = value)} />
            </label>
        </div>
    }
}

#[function_component(ProjectStep)]
fn project_step(props: &StepProps) -> Html {
    let data = props.wizard.data();
    let on_desc = {
        let wizard = props.wizard.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(area) = event.target_dyn_into::<web_sys::HtmlTextAreaElement>() {
                let value = area.value();
                wizard.update(move |data| data.project_desc = value);
            }
        })
    };
    html! {
        <div class="grid gap-5">
            <label class="form-control gap-2">
                <span class="label-text">{"Project name"}</span>
                <input class="input input-bordered" value={data.project_name.clone()}
                    oninput={text_input(&props.wizard, |data, value| data.project_name = value)} />
            </label>
            <label class="form-control gap-2">
                <span class="label-text">{"Description"}</span>
                <textarea class="textarea textarea-bordered" value={data.project_desc.clone()} oninput={on_desc} />
            </label>
        </div>
    }
}

#[function_component(PreferencesStep)]
fn preferences_step(props: &StepProps) -> Html {
    let data = props.wizard.data();
    let on_newsletter = {
        let wizard = props.wizard.clone();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                let checked = input.checked();
                wizard.update(move |data| data.newsletter = checked);
            }
        })
    };
    html! {
        <div class="grid gap-5">
            <div class="grid gap-2">
                <span class="label-text">{"Budget"}</span>
                {for Budget::ALL.into_iter().map(|budget| {
                    let wizard = props.wizard.clone();
                    let onchange = Callback::from(move |_: Event| wizard.update(move |data| data.budget = budget));
                    html! {
                        <label class="label cursor-pointer justify-start gap-3">
                            <input type="radio" class="radio" name="budget" checked={data.budget == budget} onchange={onchange} />
                            <span>{budget.label()}</span>
                        </label>
                    }
                })}
            </div>
            <label class="label cursor-pointer justify-start gap-3">
                <input type="checkbox" class="toggle" checked={data.newsletter} onchange={on_newsletter} />
                <span>{"Subscribe to the newsletter"}</span>
            </label>
        </div>
    }
}

#[function_component(ReviewStep)]
fn review_step(props: &StepProps) -> Html {
    let data = props.wizard.data();
    let rows = [
        ("Name", data.name.clone()),
        ("Email", data.email.clone()),
        ("Project", data.project_name.clone()),
        ("Description", data.project_desc.clone()),
        ("Newsletter", if data.newsletter { "Yes" } else { "No" }.to_string()),
        ("Budget", data.budget.label().to_string()),
    ];
    html! {
        <dl class="grid grid-cols-[auto_1fr] gap-x-6 gap-y-2 text-sm">
            {for rows.into_iter().map(|(label, value)| html! {
                <>
                    <dt class="opacity-70">{label}</dt>
                    <dd class="font-medium">{value}</dd>
                </>
            })}
        </dl>
    }
}

fn wizard_steps() -> Vec<Step<StepBody<SignupForm>>> {
    vec![
        Step::with_content(
            "details",
            StepContent::derived(|wizard: &WizardHandle<SignupForm>| {
                html! { <DetailsStep wizard={wizard.clone()} /> }
            }),
        )
        .with_label("Your details"),
        Step::with_content(
            "project",
            StepContent::derived(|wizard: &WizardHandle<SignupForm>| {
                html! { <ProjectStep wizard={wizard.clone()} /> }
            }),
        )
        .with_label("Project"),
        Step::with_content(
            "preferences",
            StepContent::derived(|wizard: &WizardHandle<SignupForm>| {
                html! { <PreferencesStep wizard={wizard.clone()} /> }
            }),
        )
        .with_label("Preferences"),
        Step::with_content(
            "review",
            StepContent::derived(|wizard: &WizardHandle<SignupForm>| {
                html! { <ReviewStep wizard={wizard.clone()} /> }
            }),
        )
        .with_label("Review"),
    ]
}

fn demo_options() -> Vec<PollOption> {
    vec![
        PollOption::new("glass", "Glassmorphism", 5),
        PollOption::new("bento", "Bento grids", 2),
        PollOption::new("neobrut", "Neo‑brutalism", 2),
        PollOption::new("minimal", "Ultra minimal", 1),
    ]
}

fn quick_poll_config() -> PollConfig {
    PollConfig {
        id: QUICK_POLL_ID.to_string(),
        title: Some("What’s your favorite UI library?".to_string()),
        description: Some("The author can see how you vote.".to_string()),
        options: [("react", "React", 2), ("vue", "Vue", 1), ("svelte", "Svelte", 0)]
            .into_iter()
            .map(|(id, label, votes)| PollOptionConfig {
                id: id.to_string(),
                label: label.to_string(),
                votes,
            })
            .collect(),
        allow_revote: false,
        show_results_before_vote: false,
        read_only: false,
    }
}

#[function_component(ShowcaseApp)]
fn showcase_app() -> Html {
    let quick_poll_key = use_state(|| 0_u32);
    let on_quick_poll_reset = {
        let quick_poll_key = quick_poll_key.clone();
        Callback::from(move |()| {
            let stamp = String::from(js_sys::Date::new_0().to_iso_string());
            console::log!(format!("Poll \"{QUICK_POLL_ID}\" was reset at {stamp}"));
            if BrowserStore.remove(&snapshot_key(QUICK_POLL_ID)).is_err() {
                console::warn!("quick poll snapshot could not be cleared");
            }
            quick_poll_key.set(*quick_poll_key + 1);
        })
    };
    let on_submit = Callback::from(|data: SignupForm| match serde_json::to_string(&data) {
        Ok(json) => console::log!("wizard submitted", json),
        Err(err) => console::error!("wizard payload encode failed", err.to_string()),
    });
    let can_continue = Callback::from(|(data, step): (SignupForm, usize)| step_is_valid(&data, step));
    let wizard_config = WizardConfig {
        heading: "Animated 4-step wizard".to_string(),
        continue_label: "Next".to_string(),
        submit_label: "Finish".to_string(),
        progress_style: ProgressStyle::Line,
        ..WizardConfig::default()
    };
    let demo_footer = Callback::from(|poll: PollHandle| {
        html! {
            <PollFooter>
                <PollVoteInfo poll={poll.clone()} />
                <PollReset poll={poll} />
            </PollFooter>
        }
    });
    let read_only_body = Callback::from(|poll: PollHandle| {
        html! {
            <>
                <PollHeader>
                    <PollTitle>{"Favorite UI Library?"}</PollTitle>
                    <PollDescription>{"Pick one and see what others think."}</PollDescription>
                </PollHeader>
                <PollOptions poll={poll.clone()} />
                <PollFooter>
                    <PollReset poll={poll} />
                </PollFooter>
            </>
        }
    });

    html! {
        <div class="mx-auto grid w-full max-w-5xl gap-8 p-6 md:p-10">
            <MultiStepForm<SignupForm>
                steps={wizard_steps()}
                initial_data={SignupForm::default()}
                config={wizard_config}
                can_continue={can_continue}
                on_submit={on_submit}
            />
            <div class="divider" />
            <Poll
                id="demo"
                title="Favorite UI Library?"
                description="Pick one and see what others think."
                options={demo_options()}
                footer={demo_footer}
            />
            <div class="divider" />
            <Poll
                id="demo-read-only"
                options={demo_options()}
                show_results_before_vote={true}
                read_only={true}
                body={read_only_body}
            />
            <div class="divider" />
            <QuickPollBlock
                key={(*quick_poll_key).to_string()}
                config={quick_poll_config()}
                on_reset={on_quick_poll_reset}
            />
        </div>
    }
}

/// Mount the showcase into `#root`, or the document body when absent.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<ShowcaseApp>::with_root(root).render();
    } else {
        yew::Renderer::<ShowcaseApp>::new().render();
    }
}

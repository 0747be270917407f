//! Yew components for the wizard and poll widgets.

pub mod poll;
pub mod quick_poll;
pub mod wizard;

pub use poll::{
    Poll, PollDescription, PollFooter, PollHandle, PollHeader, PollOptionButton, PollOptions,
    PollReset, PollTitle, PollVoteInfo,
};
pub use quick_poll::QuickPollBlock;
pub use wizard::{
    FormData, MultiStepForm, MultiStepFormContent, MultiStepFormFooter, MultiStepFormHeader,
    StepBody, WizardHandle,
};

#![allow(non_snake_case)]

mod claim;
mod components;
mod config;
mod controller;
mod error;
mod ethereum;
mod provider;
mod reconcile;
mod refresh;
mod state;
#[cfg(test)]
mod testing;

use std::rc::Rc;

use dioxus::prelude::*;
use futures::channel::mpsc;
use futures::StreamExt;
use tracing::Level;

use config::DappConfig;
use controller::Controller;
use ethereum::{MetaMask, OnboardingWidget, VestingContracts};
use state::DappState;

const STYLE: &str = include_str!("../assets/style.css");

/// The controller as wired on the page, shared through context.
pub type SharedController =
    Rc<Controller<MetaMask, VestingContracts, OnboardingWidget, Signal<DappState>>>;

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Provide shared state to all components
    let state = use_context_provider(|| Signal::new(DappState::default()));
    let config = use_context_provider(DappConfig::from_location);
    let controller = use_context_provider::<SharedController>(|| {
        let onboarding = OnboardingWidget::new(&config);
        Rc::new(Controller::new(
            MetaMask::detect(),
            VestingContracts,
            onboarding,
            state,
            config.clone(),
        ))
    });

    use_hook(move || spawn(drive_wallet(controller)));

    rsx! {
        document::Style { {STYLE} }
        components::layout::Page {}
    }
}

/// Runs start-up, then feeds wallet events to the controller for the life
/// of the page.
async fn drive_wallet(controller: SharedController) {
    let (events_tx, mut events) = mpsc::unbounded();
    if controller.initialize(events_tx).await.needs_refresh() {
        spawn_refresh(&controller);
    }
    while let Some(event) = events.next().await {
        if controller.handle_event(event).needs_refresh() {
            spawn_refresh(&controller);
        }
    }
}

/// Runs a balance refresh as its own task so the caller is not held up.
pub fn spawn_refresh(controller: &SharedController) {
    let controller = controller.clone();
    spawn(async move { controller.refresh_balances().await });
}

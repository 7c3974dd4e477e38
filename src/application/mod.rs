//! Application layer: the checkout workflow and its three stages.
//!
//! `ScriptLoader` runs once at mount and gates `OrderInitiator`, which
//! hands each accepted order to `WidgetLauncher`. `PaymentWorkflow` wires
//! them together and tracks the attempt state.

pub mod loading;
pub mod order_initiator;
pub mod script_loader;
pub mod state;
pub mod widget_launcher;
pub mod workflow;

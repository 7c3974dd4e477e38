//! Value types exchanged with the checkout collaborators and the ports
//! through which the workflow reaches them.

pub mod amount;
pub mod notification;
pub mod order;
pub mod payment;
pub mod ports;
pub mod widget;

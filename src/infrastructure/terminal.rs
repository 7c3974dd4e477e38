use crate::domain::notification::{Notification, NotificationKind};
use crate::domain::payment::PaymentResult;
use crate::domain::ports::{CheckoutWidget, CheckoutWidgetFactory, Notifier};
use crate::domain::widget::{CheckoutOptions, CompletionCallback};
use crate::error::{CheckoutError, Result};
use std::io::Read;
use std::sync::Mutex;
use tracing::{error, info, warn};

/// Prints notifications to stderr and mirrors them into the log.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => error!(message = %notification.message, "notification"),
            _ => info!(message = %notification.message, "notification"),
        }
        eprintln!("{notification}");
    }

    fn dismiss(&self) {}
}

type Input = Box<dyn Read + Send>;

/// A checkout widget for terminals.
///
/// Opening it prints the checkout options and reads the widget's payment
/// result as JSON from the input (usually stdin). Empty or unreadable input
/// counts as the user closing the widget. The input is read on Tokio's
/// blocking pool, so widgets must be opened inside a runtime.
pub struct TerminalWidgetFactory {
    input: Mutex<Option<Input>>,
}

impl TerminalWidgetFactory {
    pub fn new(input: impl Read + Send + 'static) -> Self {
        Self {
            input: Mutex::new(Some(Box::new(input))),
        }
    }
}

impl CheckoutWidgetFactory for TerminalWidgetFactory {
    fn create(
        &self,
        options: CheckoutOptions,
        on_complete: CompletionCallback,
    ) -> Result<Box<dyn CheckoutWidget>> {
        let input = self
            .input
            .lock()
            .map_err(|_| CheckoutError::Widget("input lock poisoned".to_string()))?
            .take()
            .ok_or_else(|| CheckoutError::Widget("terminal input already consumed".to_string()))?;

        Ok(Box::new(TerminalWidget {
            options,
            input: Some(input),
            on_complete: Some(on_complete),
        }))
    }
}

struct TerminalWidget {
    options: CheckoutOptions,
    input: Option<Input>,
    on_complete: Option<CompletionCallback>,
}

impl CheckoutWidget for TerminalWidget {
    fn open(&mut self) -> Result<()> {
        let (Some(mut input), Some(on_complete)) = (self.input.take(), self.on_complete.take())
        else {
            return Err(CheckoutError::Widget("widget already opened".to_string()));
        };

        let rendered = serde_json::to_string_pretty(&self.options)
            .map_err(|e| CheckoutError::Widget(e.to_string()))?;
        eprintln!("Checkout options:\n{rendered}");
        eprintln!("Paste the payment result JSON, then close the input (empty input cancels):");

        tokio::task::spawn_blocking(move || {
            let mut raw = String::new();
            if let Err(e) = input.read_to_string(&mut raw) {
                warn!(error = %e, "could not read payment result");
                return;
            }
            if raw.trim().is_empty() {
                return;
            }
            match serde_json::from_str::<PaymentResult>(&raw) {
                Ok(result) => {
                    on_complete.complete(result);
                }
                Err(e) => warn!(error = %e, "ignoring malformed payment result"),
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::widget::{Prefill, Theme, completion_channel};
    use std::io::Cursor;

    fn options() -> CheckoutOptions {
        CheckoutOptions {
            key: "key".to_string(),
            amount: 1000,
            currency: "INR".to_string(),
            name: "Test Payment".to_string(),
            description: "Test Transaction".to_string(),
            order_id: "order_1".to_string(),
            prefill: Prefill::default(),
            theme: Theme {
                color: "#4F46E5".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_reads_payment_result() {
        let json = r#"{"razorpay_payment_id":"pay_1","razorpay_order_id":"order_1","razorpay_signature":"sig"}"#;
        let factory = TerminalWidgetFactory::new(Cursor::new(json.as_bytes().to_vec()));
        let (callback, completion) = completion_channel();

        factory.create(options(), callback).unwrap().open().unwrap();

        let result = completion.wait().await.unwrap();
        assert_eq!(result.payment_id, "pay_1");
        assert_eq!(result.order_id, "order_1");
    }

    #[tokio::test]
    async fn test_empty_input_abandons() {
        let factory = TerminalWidgetFactory::new(Cursor::new(Vec::new()));
        let (callback, completion) = completion_channel();

        factory.create(options(), callback).unwrap().open().unwrap();

        assert!(completion.wait().await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_input_abandons() {
        let factory = TerminalWidgetFactory::new(Cursor::new(b"not json".to_vec()));
        let (callback, completion) = completion_channel();

        factory.create(options(), callback).unwrap().open().unwrap();

        assert!(completion.wait().await.is_none());
    }

    #[test]
    fn test_input_used_once() {
        let factory = TerminalWidgetFactory::new(Cursor::new(Vec::new()));
        let (first, _a) = completion_channel();
        let (second, _b) = completion_channel();

        assert!(factory.create(options(), first).is_ok());
        assert!(matches!(
            factory.create(options(), second),
            Err(CheckoutError::Widget(_))
        ));
    }
}

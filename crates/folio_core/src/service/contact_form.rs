//! Contact form submission controller.
//!
//! # Responsibility
//! - Validate submitted fields and run the simulated send.
//!
//! # Invariants
//! - At most one send is pending; submits during a send are refused.
//! - Field contents are never logged.

use crate::config::FormConfig;
use crate::error::{CoreError, CoreResult};
use crate::model::effect::Effect;
use crate::model::element::ElementRef;
use crate::model::form::{FormFields, ValidationError};
use crate::model::layout::ContactFormLayout;
use crate::service::form_validator::validate_with;
use crate::service::{ScheduledTask, Timers};
use log::{debug, info};

/// Toast text shown once the simulated send completes.
pub const SENT_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

const SENDING_HTML: &str =
    r#"<i data-lucide="loader-2" class="w-5 h-5 mr-2 animate-spin"></i>Sending..."#;
const DISABLED_ATTRIBUTE: &str = "disabled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the caller surfaces the reason as an error toast.
    Rejected(ValidationError),
    /// Send started.
    Sending,
    /// A previous send is still pending.
    Busy,
}

#[derive(Debug)]
pub struct ContactForm {
    form: ElementRef,
    submit_button: Option<ElementRef>,
    submit_html: String,
    config: FormConfig,
    sending: bool,
}

impl ContactForm {
    pub fn from_layout(layout: Option<&ContactFormLayout>, config: FormConfig) -> CoreResult<Self> {
        let layout = layout.ok_or(CoreError::MissingElement("contact-form"))?;
        Ok(Self {
            form: layout.form.clone(),
            submit_button: layout.submit_button.clone(),
            submit_html: layout.submit_html.clone(),
            config,
            sending: false,
        })
    }

    /// Rules the form is validated against.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn submit(
        &mut self,
        fields: &FormFields,
        timers: &mut Timers,
    ) -> (SubmitOutcome, Vec<Effect>) {
        if self.sending {
            debug!("event=contact_submit module=contact_form status=busy");
            return (SubmitOutcome::Busy, Vec::new());
        }
        if let Err(err) = validate_with(fields, &self.config) {
            info!(
                "event=contact_submit module=contact_form status=rejected field={} reason={:?}",
                err.field.as_str(),
                err.reason
            );
            return (SubmitOutcome::Rejected(err), Vec::new());
        }

        self.sending = true;
        timers.schedule(
            self.config.simulated_send_ms,
            None,
            ScheduledTask::ContactSendComplete,
        );
        info!("event=contact_submit module=contact_form status=sending");

        let mut effects = Vec::new();
        if let Some(button) = &self.submit_button {
            effects.push(Effect::SetContent {
                target: button.clone(),
                html: SENDING_HTML.to_string(),
            });
            effects.push(Effect::set_attribute(button, DISABLED_ATTRIBUTE, ""));
            effects.push(Effect::RenderIcons);
        }
        (SubmitOutcome::Sending, effects)
    }

    /// Simulated send finished. The caller shows [`SENT_MESSAGE`].
    pub fn on_send_complete(&mut self) -> Vec<Effect> {
        if !self.sending {
            return Vec::new();
        }
        self.sending = false;
        info!("event=contact_send module=contact_form status=ok");

        let mut effects = vec![Effect::ResetForm {
            target: self.form.clone(),
        }];
        if let Some(button) = &self.submit_button {
            effects.push(Effect::SetContent {
                target: button.clone(),
                html: self.submit_html.clone(),
            });
            effects.push(Effect::RemoveAttribute {
                target: button.clone(),
                name: DISABLED_ATTRIBUTE.to_string(),
            });
            effects.push(Effect::RenderIcons);
        }
        effects
    }
}

//! Switch listener that reports the new selection on the console

use colored::Colorize;
use envswitch_application::{ListenerError, SwitchListener};
use envswitch_domain::{ConfigurationDescriptor, HostContext};

/// Prints the newly selected environment to stderr.
///
/// Runs during listener fan-out, so the line is written even when the
/// process terminates right after the switch.
pub struct ConsoleSwitchReporter {
    domain: String,
}

impl ConsoleSwitchReporter {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    pub fn message(&self, host: &HostContext, descriptor: &dyn ConfigurationDescriptor) -> String {
        format!(
            "{} {} -> {} ({}) for {}",
            "Switching".green().bold(),
            self.domain,
            descriptor.name(),
            descriptor.id(),
            host.app_name()
        )
    }
}

impl SwitchListener for ConsoleSwitchReporter {
    fn on_switch(
        &self,
        host: &HostContext,
        descriptor: &dyn ConfigurationDescriptor,
    ) -> Result<(), ListenerError> {
        eprintln!("{}", self.message(host, descriptor));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envswitch_domain::ConfigId;

    struct Qa;

    impl ConfigurationDescriptor for Qa {
        fn id(&self) -> ConfigId {
            ConfigId::new(3)
        }

        fn name(&self) -> &str {
            "QA"
        }

        fn is_production(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_message_names_domain_and_environment() {
        colored::control::set_override(false);
        let reporter = ConsoleSwitchReporter::new("api");
        assert_eq!(
            reporter.message(&HostContext::new("shop"), &Qa),
            "Switching api -> QA (3) for shop"
        );
        assert!(reporter.on_switch(&HostContext::new("shop"), &Qa).is_ok());
    }
}

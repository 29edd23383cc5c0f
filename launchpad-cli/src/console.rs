//! Terminal front end for the workflow seams

use colored::*;
use reqwest::Url;

use crate::admin::Navigator;
use crate::workflow::{Notification, Notifier, Outcome};

/// Prints status changes to stdout and notifications as colored headlines
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.outcome {
            Outcome::Success => println!(
                "{} {}",
                "✓".green(),
                notification.title.bold()
            ),
            Outcome::Failure => eprintln!(
                "{} {}",
                "✗".red(),
                notification.title.bold()
            ),
        }
    }

    fn status_changed(&self, status: &str) {
        println!("{}", status);
    }
}

/// Announces the new admin address; the admin command reconnects there
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, url: &Url) {
        println!("{} {}", "→ Reconnecting to".cyan(), url.as_str().bold());
    }
}

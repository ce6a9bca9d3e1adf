use anyhow::Context;
use nono_common::config::Config;
use nono_core::people::PeopleApi;
use nono_core::scanner::{ContactScanner, ScanReport};

use crate::terminal::print;
use crate::terminal::prompt::ConsolePrompt;
use crate::terminal::report::TerminalReporter;

pub async fn fix(cfg: &Config) -> anyhow::Result<()> {
    let token = cfg.access_token()?;
    let service = PeopleApi::new(&cfg.api_base, token);
    let prompt = ConsolePrompt::new();
    let reporter = TerminalReporter::new();

    let report = ContactScanner::new(&service, &prompt, &cfg.rules)
        .with_reporter(&reporter)
        .with_group(cfg.group.as_deref())
        .dry_run(cfg.dry_run)
        .run()
        .await
        .context("scan aborted")?;

    scan_ends(&report);
    Ok(())
}

fn scan_ends(report: &ScanReport) {
    print::header("summary");
    print::aligned_line("Contacts", report.total_contacts.to_string());
    print::aligned_line("Queued", report.queued_contacts.to_string());

    let refused = report.outcomes.iter().filter(|o| !o.is_success()).count();
    if refused > 0 {
        print::aligned_line("Refused", refused.to_string());
    }
    for name in &report.unsnapshotted {
        print::aligned_line("Not updated", name.as_str());
    }

    print::header("updated");
    print::lines(report.audit.updated());

    print::header("skipped");
    print::lines(report.audit.skipped());

    print::fat_separator();
}

use std::path::Path;

use time::macros::format_description;
use time::OffsetDateTime;

use crate::models::{RoomFixture, RunStats, UserFixture};

/// Append-only Markdown buffer; one fragment per executed test case plus
/// section headers, flushed to disk exactly once at the end of the run
#[derive(Debug, Default)]
pub struct ReportBuilder {
    fragments: Vec<String>,
}

/// Everything the header and footer need, borrowed from the run context
pub struct RunSummary<'a> {
    pub base_url: &'a str,
    pub stats: &'a RunStats,
    pub users: &'a [UserFixture],
    pub rooms: &'a [RoomFixture],
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Start a new scenario section
    pub fn section(&mut self, title: &str) {
        self.push(format!("\n## {}\n", title));
    }

    /// Compose the full Markdown document: header, failure list, accumulated
    /// fragments in execution order, footer
    pub fn render(&self, summary: &RunSummary) -> String {
        let stats = summary.stats;

        let mut report = format!(
            "# Poker Score Backend API Test Report\n\
             \n\
             ## Test Info\n\
             \n\
             - **Run time**: {}\n\
             - **Environment**: {}\n\
             - **Tool**: Rust + reqwest\n\
             \n\
             ## Statistics\n\
             \n\
             - **Total tests**: {}\n\
             - **Passed**: {} ✅\n\
             - **Failed**: {} ❌\n\
             - **Pass rate**: {:.2}%\n",
            timestamp(),
            summary.base_url,
            stats.total,
            stats.passed,
            stats.failed,
            stats.pass_rate(),
        );

        if !stats.failures.is_empty() {
            report.push_str("\n## Failed Tests\n\n");
            for (i, failure) in stats.failures.iter().enumerate() {
                report.push_str(&format!("{}. {}\n", i + 1, failure));
            }
        }

        report.push_str("\n---\n");
        report.push_str(&self.fragments.join("\n"));
        report.push_str(&self.footer(summary));
        report
    }

    fn footer(&self, summary: &RunSummary) -> String {
        let mut footer = String::from("\n\n---\n\n## Test Data Summary\n\n### Users created\n\n");

        for (i, user) in summary.users.iter().enumerate() {
            footer.push_str(&format!(
                "{}. user id: {}, nickname: {}, phone: {}\n",
                i + 1,
                user.id,
                user.nickname,
                user.phone
            ));
        }

        footer.push_str("\n### Rooms created\n\n");
        for (i, room) in summary.rooms.iter().enumerate() {
            footer.push_str(&format!(
                "{}. room id: {}, code: {}, type: {}\n",
                i + 1,
                room.id,
                room.code,
                room.room_type
            ));
        }

        footer.push_str(&format!(
            "\n---\n\
             \n\
             ## Notes\n\
             \n\
             1. The harness exercises every documented HTTP endpoint in order, covering both happy and error paths\n\
             2. WebSocket endpoints are real-time and excluded from this run; test them manually\n\
             3. Admin endpoints require a user whose role was set to 'admin' in the user store\n\
             4. Some cases depend on earlier fixtures and may be skipped on a dirty environment\n\
             \n\
             ---\n\
             \n\
             **Finished**: {}\n",
            timestamp()
        ));

        footer
    }

    /// Write the rendered report in one shot, overwriting any previous run
    pub fn write(&self, path: impl AsRef<Path>, summary: &RunSummary) -> std::io::Result<()> {
        std::fs::write(path, self.render(summary))
    }
}

fn timestamp() -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    OffsetDateTime::now_utc()
        .format(&format)
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_summary<'a>(stats: &'a RunStats) -> RunSummary<'a> {
        RunSummary {
            base_url: "http://localhost:8080/api",
            stats,
            users: &[],
            rooms: &[],
        }
    }

    #[test]
    fn test_render_empty_run() {
        let builder = ReportBuilder::new();
        let stats = RunStats::new();
        let report = builder.render(&empty_summary(&stats));

        assert!(report.contains("**Total tests**: 0"));
        assert!(report.contains("**Pass rate**: 0.00%"));
        assert!(!report.contains("## Failed Tests"));
    }

    #[test]
    fn test_failures_are_enumerated_from_one() {
        let builder = ReportBuilder::new();
        let mut stats = RunStats::new();
        stats.begin_case();
        stats.record_failure("1.1 register", "HTTP status mismatch");
        stats.begin_case();
        stats.record_failure("1.2 login", "business code mismatch");

        let report = builder.render(&empty_summary(&stats));
        assert!(report.contains("1. 1.1 register: HTTP status mismatch"));
        assert!(report.contains("2. 1.2 login: business code mismatch"));
    }

    #[test]
    fn test_fragments_keep_execution_order() {
        let mut builder = ReportBuilder::new();
        let mut stats = RunStats::new();
        for name in ["alpha", "beta", "gamma"] {
            stats.begin_case();
            stats.record_pass();
            builder.push(format!("\n#### {}\n", name));
        }

        let report = builder.render(&empty_summary(&stats));
        let alpha = report.find("#### alpha").unwrap();
        let beta = report.find("#### beta").unwrap();
        let gamma = report.find("#### gamma").unwrap();
        assert!(alpha < beta && beta < gamma);

        // one fragment per executed case, and the header total matches
        assert_eq!(report.matches("#### ").count(), stats.total as usize);
        assert!(report.contains("**Total tests**: 3"));
    }

    #[test]
    fn test_footer_lists_fixtures() {
        let builder = ReportBuilder::new();
        let stats = RunStats::new();
        let users = vec![crate::models::UserFixture {
            id: 7,
            phone: "13800000000".to_string(),
            nickname: "Test User 1".to_string(),
            password: "123456".to_string(),
        }];
        let rooms = vec![crate::models::RoomFixture {
            id: 3,
            code: "ABC123".to_string(),
            room_type: "texas".to_string(),
        }];

        let summary = RunSummary {
            base_url: "http://localhost:8080/api",
            stats: &stats,
            users: &users,
            rooms: &rooms,
        };
        let report = builder.render(&summary);
        assert!(report.contains("1. user id: 7, nickname: Test User 1, phone: 13800000000"));
        assert!(report.contains("1. room id: 3, code: ABC123, type: texas"));
    }
}

//! Dashboard display formatting

use crate::config::Settings;
use crate::reports::DashboardReport;

/// Format the dashboard block
pub fn format_dashboard(report: &DashboardReport, settings: &Settings) -> String {
    let mut output = String::new();

    if !report.has_history {
        output.push_str("\nNo transaction history yet. Start saving today!\n");
    }

    output.push_str("\n===== Dashboard =====\n");
    output.push_str(&format!(
        "Total Saved: {}\n",
        settings.format_amount(report.total_saved)
    ));
    output.push_str(&format!("Days Saved: {}\n", report.days_saved));
    output.push_str(&format!(
        "Target Remaining: {}\n",
        settings.format_amount(report.remaining)
    ));
    output.push_str(&format!(
        "Deposits: {} | Withdrawals: {}\n",
        report.deposit_count, report.withdraw_count
    ));
    output.push_str(&format!(
        "Daily Goal: {} | Target: {}\n",
        settings.format_amount(report.daily_goal),
        settings.format_amount(report.target)
    ));
    output.push_str("=====================\n");

    output
}

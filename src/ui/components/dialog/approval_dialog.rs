//! Confirmation shown after a successful submission

use super::base::{close_hint, render_dialog, DialogConfig};
use crate::state::Approval;
use ratatui::{style::Color, Frame};

pub const APPROVAL_TITLE: &str = "Заявка одобрена";

/// Congratulation line for an approved application
pub fn approval_message(approval: &Approval) -> String {
    format!(
        "Поздравляем, {}. Вам одобрена ${} на {} дней.",
        approval.applicant, approval.amount, approval.term_days
    )
}

pub fn render_approval_dialog(frame: &mut Frame, approval: &Approval) {
    let message = approval_message(approval);
    let record = approval.record.to_pretty_json();

    render_dialog(
        frame,
        DialogConfig {
            title: APPROVAL_TITLE,
            title_color: Color::Green,
            border_color: Color::Green,
            message: &message,
            details: Some(&record),
            hint: Some(close_hint("закрыть")),
            max_width: 72,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_message() {
        let approval = Approval {
            applicant: "Иванов Иван".to_string(),
            amount: 500,
            term_days: 15,
            record: serde_json::from_value(serde_json::json!({"id": 1, "title": "Иванов Иван"}))
                .unwrap(),
        };
        assert_eq!(
            approval_message(&approval),
            "Поздравляем, Иванов Иван. Вам одобрена $500 на 15 дней."
        );
    }
}

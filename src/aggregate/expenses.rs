use crate::model::{category_color, Expense};
use serde::Serialize;

/// One slice of the expense breakdown chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

/// Groups expenses by their exact category text and sums the amounts.
///
/// Categories appear in the order they are first seen. An amount that does not parse makes its
/// category's total `NaN`.
pub fn expense_breakdown(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for expense in expenses {
        let amount = expense.amount().value();
        match totals.iter_mut().find(|t| t.name == expense.category()) {
            Some(total) => total.value += amount,
            None => totals.push(CategoryTotal {
                name: expense.category().to_string(),
                value: amount,
                color: category_color(expense.category()),
            }),
        }
    }
    totals
}

/// The grand total of a breakdown.
pub fn total_expenses(breakdown: &[CategoryTotal]) -> f64 {
    breakdown.iter().map(|t| t.value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FALLBACK_COLOR;
    use crate::test::expense;
    use std::collections::BTreeSet;

    #[test]
    fn test_example_breakdown() {
        let expenses = vec![
            expense("1", "Food", "150", "2025-06-02"),
            expense("2", "Food", "50", "2025-06-03"),
            expense("3", "Transport", "500", "2025-06-04"),
        ];
        let breakdown = expense_breakdown(&expenses);
        assert_eq!(
            breakdown,
            vec![
                CategoryTotal {
                    name: "Food".to_string(),
                    value: 200.0,
                    color: "#3B82F6",
                },
                CategoryTotal {
                    name: "Transport".to_string(),
                    value: 500.0,
                    color: "#10B981",
                },
            ]
        );
        assert_eq!(total_expenses(&breakdown), 700.0);
    }

    #[test]
    fn test_empty() {
        let breakdown = expense_breakdown(&[]);
        assert!(breakdown.is_empty());
        assert_eq!(total_expenses(&breakdown), 0.0);
    }

    #[test]
    fn test_first_seen_order_and_unique_names() {
        let expenses = vec![
            expense("1", "Books", "10", "2025-06-01"),
            expense("2", "Food", "5", "2025-06-01"),
            expense("3", "Books", "10", "2025-06-01"),
            expense("4", "Education", "1200", "2025-06-01"),
            expense("5", "Food", "5", "2025-06-01"),
        ];
        let breakdown = expense_breakdown(&expenses);
        let names: Vec<&str> = breakdown.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Books", "Food", "Education"]);
        let unique: BTreeSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(breakdown[2].color, FALLBACK_COLOR);
    }

    #[test]
    fn test_total_matches_sum_of_amounts() {
        let amounts = ["12.5", "7.25", "100", "0", "3.75", "42"];
        let categories = ["Food", "Transport", "Food", "Books", "Other", "Transport"];
        let expenses: Vec<Expense> = amounts
            .iter()
            .zip(categories.iter())
            .enumerate()
            .map(|(ix, (amount, category))| {
                expense(&ix.to_string(), category, amount, "2025-06-01")
            })
            .collect();
        let expected: f64 = amounts.iter().map(|a| a.parse::<f64>().unwrap()).sum();
        let total = total_expenses(&expense_breakdown(&expenses));
        assert!((total - expected).abs() < 1e-9, "{total} != {expected}");
    }

    #[test]
    fn test_category_is_case_sensitive() {
        let expenses = vec![
            expense("1", "Food", "1", "2025-06-01"),
            expense("2", "food", "2", "2025-06-01"),
        ];
        let breakdown = expense_breakdown(&expenses);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[1].color, FALLBACK_COLOR);
    }

    #[test]
    fn test_malformed_amount_poisons_only_its_category() {
        let expenses = vec![
            expense("1", "Food", "10", "2025-06-01"),
            expense("2", "Food", "ten", "2025-06-01"),
            expense("3", "Transport", "5", "2025-06-01"),
        ];
        let breakdown = expense_breakdown(&expenses);
        assert!(breakdown[0].value.is_nan());
        assert_eq!(breakdown[1].value, 5.0);
        assert!(total_expenses(&breakdown).is_nan());
    }

    #[test]
    fn test_infinity_text_poisons_as_nan() {
        let expenses = vec![
            expense("1", "Food", "inf", "2025-06-01"),
            expense("2", "Books", "infinity", "2025-06-01"),
        ];
        let breakdown = expense_breakdown(&expenses);
        assert!(breakdown.iter().all(|t| t.value.is_nan()));
        assert!(total_expenses(&breakdown).is_nan());
    }

    #[test]
    fn test_idempotent() {
        let expenses = vec![
            expense("1", "Food", "1.1", "2025-06-01"),
            expense("2", "Books", "2.2", "2025-06-01"),
        ];
        assert_eq!(expense_breakdown(&expenses), expense_breakdown(&expenses));
    }
}

//! Pure derivations over the transaction collection used by the dashboard and transaction list.
//!
//! Everything here is recomputed from the current collection on every request.

use time::Date;

use crate::{
    month::YearMonth,
    transaction::{CategoryName, Transaction, TransactionType},
};

/// The summed amounts of expenses and income.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Totals {
    /// The total amount spent.
    pub expenses: f64,
    /// The total amount earned.
    pub income: f64,
}

impl Totals {
    /// Income minus expenses.
    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// The total spent in a single category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: CategoryName,
    pub amount: f64,
}

/// The transactions that happened on a single date.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub date: Date,
    pub transactions: Vec<Transaction>,
}

/// Sum the amounts of expenses and income separately.
pub fn totals_by_type(transactions: &[Transaction]) -> Totals {
    transactions
        .iter()
        .fold(Totals::default(), |mut totals, transaction| {
            match transaction.type_ {
                TransactionType::Expense => totals.expenses += transaction.amount,
                TransactionType::Income => totals.income += transaction.amount,
            }

            totals
        })
}

/// Sum the expenses in each category.
///
/// Categories appear in the order of their first expense. Income is ignored,
/// so a category that only has income is absent from the result.
pub fn sum_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.type_ == TransactionType::Expense)
    {
        match totals
            .iter_mut()
            .find(|total| total.category == transaction.category)
        {
            Some(total) => total.amount += transaction.amount,
            None => totals.push(CategoryTotal {
                category: transaction.category.clone(),
                amount: transaction.amount,
            }),
        }
    }

    totals
}

/// The transactions dated within `month`, in their original order.
pub fn filter_by_month(transactions: &[Transaction], month: YearMonth) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| month.contains(transaction.date))
        .cloned()
        .collect()
}

/// Group transactions that share the same date.
///
/// Groups appear in the order their first transaction occurs and each group
/// keeps the relative order of its transactions.
pub fn group_by_date(transactions: &[Transaction]) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for transaction in transactions {
        match groups
            .iter_mut()
            .find(|group| group.date == transaction.date)
        {
            Some(group) => group.transactions.push(transaction.clone()),
            None => groups.push(DayGroup {
                date: transaction.date,
                transactions: vec![transaction.clone()],
            }),
        }
    }

    groups
}

/// The total expenses for each of the `count` months ending with `last`, oldest first.
///
/// Months without expenses have a total of zero.
pub fn monthly_expenses(
    transactions: &[Transaction],
    last: YearMonth,
    count: usize,
) -> Vec<(YearMonth, f64)> {
    let mut months = Vec::with_capacity(count);
    let mut month = last;

    for _ in 0..count {
        months.push((month, 0.0));
        month = month.previous();
    }

    months.reverse();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.type_ == TransactionType::Expense)
    {
        let transaction_month = YearMonth::of(transaction.date);

        if let Some((_, total)) = months
            .iter_mut()
            .find(|(month, _)| *month == transaction_month)
        {
            *total += transaction.amount;
        }
    }

    months
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::{
        month::YearMonth,
        transaction::{
            CategoryName, Transaction, TransactionBuilder, TransactionType,
            aggregation::{
                CategoryTotal, Totals, filter_by_month, group_by_date, monthly_expenses,
                sum_by_category, totals_by_type,
            },
        },
    };

    fn expense(amount: f64, category: &str, date: time::Date) -> TransactionBuilder {
        Transaction::build(TransactionType::Expense, amount, date, "")
            .category(CategoryName::new_unchecked(category))
    }

    fn income(amount: f64, category: &str, date: time::Date) -> TransactionBuilder {
        Transaction::build(TransactionType::Income, amount, date, "")
            .category(CategoryName::new_unchecked(category))
    }

    fn with_ids(builders: Vec<TransactionBuilder>) -> Vec<Transaction> {
        builders
            .into_iter()
            .zip(1..)
            .map(|(builder, id)| builder.finalize(id))
            .collect()
    }

    #[test]
    fn totals_of_empty_collection_are_zero() {
        assert_eq!(totals_by_type(&[]), Totals::default());
        assert_eq!(totals_by_type(&[]).net(), 0.0);
    }

    #[test]
    fn totals_split_by_type() {
        let transactions = with_ids(vec![
            expense(50.0, "Food", date!(2024 - 03 - 01)),
            income(1000.0, "Salary", date!(2024 - 03 - 01)),
            expense(25.5, "Bills", date!(2024 - 04 - 02)),
        ]);

        let totals = totals_by_type(&transactions);

        assert_eq!(
            totals,
            Totals {
                expenses: 75.5,
                income: 1000.0
            }
        );
        assert_eq!(totals.net(), 924.5);
    }

    #[test]
    fn sum_by_category_only_counts_expenses() {
        let transactions = with_ids(vec![
            expense(50.0, "Food", date!(2024 - 03 - 01)),
            income(1000.0, "Salary", date!(2024 - 03 - 01)),
            expense(20.0, "Bills", date!(2024 - 03 - 02)),
            expense(10.0, "Food", date!(2024 - 03 - 03)),
            income(5.0, "Bills", date!(2024 - 03 - 03)),
        ]);

        let got = sum_by_category(&transactions);

        assert_eq!(
            got,
            vec![
                CategoryTotal {
                    category: CategoryName::new_unchecked("Food"),
                    amount: 60.0
                },
                CategoryTotal {
                    category: CategoryName::new_unchecked("Bills"),
                    amount: 20.0
                },
            ]
        );
    }

    #[test]
    fn sum_by_category_omits_categories_without_expenses() {
        let transactions = with_ids(vec![income(1000.0, "Salary", date!(2024 - 03 - 01))]);

        assert!(sum_by_category(&transactions).is_empty());
    }

    #[test]
    fn filter_by_month_matches_year_and_month() {
        let transactions = with_ids(vec![
            expense(1.0, "Food", date!(2024 - 03 - 15)),
            expense(2.0, "Food", date!(2024 - 04 - 01)),
            expense(3.0, "Food", date!(2023 - 03 - 15)),
            expense(4.0, "Food", date!(2024 - 03 - 31)),
        ]);

        let got = filter_by_month(&transactions, YearMonth::new(2024, Month::March));

        assert_eq!(got, vec![transactions[0].clone(), transactions[3].clone()]);
    }

    #[test]
    fn group_by_date_keeps_first_occurrence_order() {
        let transactions = with_ids(vec![
            expense(1.0, "Food", date!(2024 - 03 - 02)),
            expense(2.0, "Food", date!(2024 - 03 - 01)),
            expense(3.0, "Food", date!(2024 - 03 - 02)),
        ]);

        let groups = group_by_date(&transactions);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, date!(2024 - 03 - 02));
        assert_eq!(
            groups[0].transactions,
            vec![transactions[0].clone(), transactions[2].clone()]
        );
        assert_eq!(groups[1].date, date!(2024 - 03 - 01));
        assert_eq!(groups[1].transactions, vec![transactions[1].clone()]);
    }

    #[test]
    fn monthly_expenses_fills_missing_months_with_zero() {
        let transactions = with_ids(vec![
            expense(10.0, "Food", date!(2024 - 01 - 05)),
            expense(5.0, "Food", date!(2024 - 03 - 01)),
            income(100.0, "Salary", date!(2024 - 03 - 01)),
            expense(7.0, "Food", date!(2024 - 03 - 20)),
            expense(99.0, "Food", date!(2023 - 06 - 01)),
        ]);

        let got = monthly_expenses(&transactions, YearMonth::new(2024, Month::March), 4);

        assert_eq!(
            got,
            vec![
                (YearMonth::new(2023, Month::December), 0.0),
                (YearMonth::new(2024, Month::January), 10.0),
                (YearMonth::new(2024, Month::February), 0.0),
                (YearMonth::new(2024, Month::March), 12.0),
            ]
        );
    }
}

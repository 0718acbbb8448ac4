//! The form fields and form data shared by the create and edit views.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    html::{
        FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE,
    },
    transaction::{CategoryName, DEFAULT_CATEGORIES, Transaction, TransactionBuilder, TransactionType},
};

/// The form data for creating or editing a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the transaction is an expense or income.
    pub type_: TransactionType,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The category name, either one of the suggestions or the user's own.
    pub category: String,
    /// The date when the transaction occurred.
    pub date: Date,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
}

impl TransactionForm {
    /// Check the form data and convert it into a transaction builder.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyCategoryName] if the category is blank,
    /// - or [Error::InvalidAmount] if the amount is NaN, infinite or negative.
    pub fn into_builder(self) -> Result<TransactionBuilder, Error> {
        let category = CategoryName::new(&self.category)?;
        let builder = Transaction::build(
            self.type_,
            self.amount,
            self.date,
            self.description.trim(),
        )
        .category(category);

        builder.validate()?;

        Ok(builder)
    }
}

pub struct TransactionFormDefaults<'a> {
    pub transaction_type: TransactionType,
    pub amount: Option<f64>,
    pub category: Option<&'a str>,
    pub date: Date,
    pub description: Option<&'a str>,
    pub autofocus_amount: bool,
}

impl<'a> TransactionFormDefaults<'a> {
    /// Defaults for a blank form dated `date`.
    pub fn blank(date: Date) -> Self {
        Self {
            transaction_type: TransactionType::Expense,
            amount: None,
            category: None,
            date,
            description: None,
            autofocus_amount: true,
        }
    }

    /// Defaults holding the current values of `transaction`.
    pub fn from_transaction(transaction: &'a Transaction) -> Self {
        Self {
            transaction_type: transaction.type_,
            amount: Some(transaction.amount),
            category: Some(transaction.category.as_ref()),
            date: transaction.date,
            description: Some(&transaction.description),
            autofocus_amount: true,
        }
    }
}

pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let is_expense = matches!(defaults.transaction_type, TransactionType::Expense);
    let amount_str = defaults.amount.map(|amount| format!("{amount:.2}"));

    html! {
        fieldset class="space-y-2"
        {
            legend class=(FORM_LABEL_STYLE) { "Transaction type" }

            div class=(FORM_RADIO_GROUP_STYLE)
            {
                div class="flex flex-1 items-center gap-3"
                {
                    input
                        name="type_"
                        id="transaction-type-expense"
                        type="radio"
                        value="expense"
                        checked[is_expense]
                        required
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-type-expense"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Expense"
                    }
                }

                div class="flex flex-1 items-center gap-3"
                {
                    input
                        name="type_"
                        id="transaction-type-income"
                        type="radio"
                        value="income"
                        checked[!is_expense]
                        required
                        class=(FORM_RADIO_INPUT_STYLE);

                    label
                        for="transaction-type-income"
                        class=(FORM_RADIO_LABEL_STYLE)
                    {
                        "Income"
                    }
                }
            }
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            div class="input-wrapper w-full"
            {
                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    placeholder="0.00"
                    min="0"
                    required
                    value=[amount_str.as_deref()]
                    autofocus[defaults.autofocus_amount]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label for="category" class=(FORM_LABEL_STYLE) { "Category" }

            input
                name="category"
                id="category"
                type="text"
                list="category-options"
                placeholder="Food"
                required
                value=[defaults.category]
                class=(FORM_TEXT_INPUT_STYLE);

            datalist id="category-options"
            {
                @for category in DEFAULT_CATEGORIES {
                    option value=(category) {}
                }
            }
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                value=(defaults.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="description"
                type="text"
                placeholder="Description"
                value=[defaults.description]
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use super::{TransactionForm, TransactionFormDefaults, transaction_form_fields};
    use crate::{
        Error,
        test_utils::{assert_form_input, assert_form_input_with_value, must_get_form},
        transaction::{CategoryName, DEFAULT_CATEGORIES, Transaction, TransactionType},
    };

    fn form(amount: f64, category: &str) -> TransactionForm {
        TransactionForm {
            type_: TransactionType::Expense,
            amount,
            category: category.to_owned(),
            date: date!(2024 - 03 - 01),
            description: " Lunch ".to_owned(),
        }
    }

    fn render(defaults: &TransactionFormDefaults<'_>) -> Html {
        let markup = maud::html! { form { (transaction_form_fields(defaults)) } };
        Html::parse_document(&markup.into_string())
    }

    #[test]
    fn form_converts_to_builder() {
        let builder = form(50.0, " Food ").into_builder().unwrap();

        assert_eq!(
            builder,
            Transaction::build(TransactionType::Expense, 50.0, date!(2024 - 03 - 01), "Lunch")
                .category(CategoryName::new_unchecked("Food"))
        );
    }

    #[test]
    fn form_rejects_blank_category() {
        assert_eq!(form(50.0, "  ").into_builder(), Err(Error::EmptyCategoryName));
    }

    #[test]
    fn form_rejects_invalid_amounts() {
        for amount in [f64::NAN, f64::INFINITY, -1.0] {
            let result = form(amount, "Food").into_builder();

            assert!(
                matches!(result, Err(Error::InvalidAmount(_))),
                "want {amount} to be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn form_fields_check_selected_type() {
        let cases = [
            (TransactionType::Expense, "expense"),
            (TransactionType::Income, "income"),
        ];

        for (transaction_type, expected) in cases {
            let mut defaults = TransactionFormDefaults::blank(date!(2024 - 03 - 01));
            defaults.transaction_type = transaction_type;
            let html = render(&defaults);

            let selector = Selector::parse("input[type=radio][name=type_]").unwrap();
            let checked = html
                .select(&selector)
                .find(|input| input.value().attr("checked").is_some())
                .and_then(|input| input.value().attr("value"));
            assert_eq!(checked, Some(expected));
        }
    }

    #[test]
    fn form_fields_are_filled_from_transaction() {
        let transaction =
            Transaction::build(TransactionType::Income, 1000.0, date!(2024 - 03 - 01), "Pay")
                .category(CategoryName::new_unchecked("Salary"))
                .finalize(1);

        let html = render(&TransactionFormDefaults::from_transaction(&transaction));
        let form = must_get_form(&html);

        assert_form_input_with_value(&form, "amount", "number", "1000.00");
        assert_form_input_with_value(&form, "category", "text", "Salary");
        assert_form_input_with_value(&form, "date", "date", "2024-03-01");
        let description = form
            .select(&Selector::parse("input[name=description]").unwrap())
            .next()
            .unwrap();
        assert_eq!(description.value().attr("value"), Some("Pay"));
    }

    #[test]
    fn category_input_suggests_default_categories() {
        let html = render(&TransactionFormDefaults::blank(date!(2024 - 03 - 01)));
        let form = must_get_form(&html);

        assert_form_input(&form, "category", "text");
        let options: Vec<_> = html
            .select(&Selector::parse("datalist#category-options option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(options, DEFAULT_CATEGORIES);
    }
}

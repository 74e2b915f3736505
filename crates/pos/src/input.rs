//! Parsing of till command lines.

use thiserror::Error;

use stockroom_core::{DomainError, ProductId};

pub const HELP: &str = "\
commands:
  catalog [term]     list products (optionally filtered)
  new                open a new sale
  add <id>           add one unit of a product
  qty <id> <n>       set a line's quantity (0 or less removes it)
  remove <id>        remove a line
  customer <name>    set the customer name
  show               show the open sale
  total              show the running total
  complete           complete the open sale
  cancel             discard the open sale
  sales              list recorded sales
  summary            sales totals (all time and today)
  receipt <no>       print a receipt
  export             dump recorded sales as JSON
  help               this text
  quit               leave the till";

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Blank,
    Help,
    Catalog(Option<String>),
    New,
    Add(ProductId),
    Quantity(ProductId, i64),
    Remove(ProductId),
    Customer(String),
    Show,
    Total,
    Complete,
    Cancel,
    Sales,
    Summary,
    Receipt(String),
    Export,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl Input {
    pub fn parse(line: &str) -> Result<Self, InputError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let input = match word.to_ascii_lowercase().as_str() {
            "" => Input::Blank,
            "help" | "?" => Input::Help,
            "catalog" | "products" => {
                Input::Catalog((!rest.is_empty()).then(|| rest.to_string()))
            }
            "new" => Input::New,
            "add" => Input::Add(product_id(rest, "add <id>")?),
            "qty" | "quantity" => {
                let (id, qty) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(InputError::Usage("qty <id> <n>"))?;
                let qty = qty
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| InputError::Usage("qty <id> <n>"))?;
                Input::Quantity(product_id(id, "qty <id> <n>")?, qty)
            }
            "remove" | "rm" => Input::Remove(product_id(rest, "remove <id>")?),
            "customer" => Input::Customer(rest.to_string()),
            "show" => Input::Show,
            "total" => Input::Total,
            "complete" => Input::Complete,
            "cancel" => Input::Cancel,
            "sales" => Input::Sales,
            "summary" => Input::Summary,
            "receipt" => {
                if rest.is_empty() {
                    return Err(InputError::Usage("receipt <no>"));
                }
                Input::Receipt(rest.to_string())
            }
            "export" => Input::Export,
            "quit" | "exit" => Input::Quit,
            other => return Err(InputError::Unknown(other.to_string())),
        };
        Ok(input)
    }
}

fn product_id(arg: &str, usage: &'static str) -> Result<ProductId, InputError> {
    if arg.is_empty() {
        return Err(InputError::Usage(usage));
    }
    Ok(arg.parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(Input::parse("  "), Ok(Input::Blank));
        assert_eq!(Input::parse("NEW"), Ok(Input::New));
        assert_eq!(Input::parse("complete"), Ok(Input::Complete));
        assert_eq!(Input::parse("exit"), Ok(Input::Quit));
    }

    #[test]
    fn parses_arguments() {
        assert_eq!(Input::parse("add 3"), Ok(Input::Add(ProductId::new(3))));
        assert_eq!(
            Input::parse("qty 1   -2"),
            Ok(Input::Quantity(ProductId::new(1), -2))
        );
        assert_eq!(
            Input::parse("customer  John Doe "),
            Ok(Input::Customer("John Doe".into()))
        );
        assert_eq!(Input::parse("catalog"), Ok(Input::Catalog(None)));
        assert_eq!(
            Input::parse("catalog vitamin"),
            Ok(Input::Catalog(Some("vitamin".into())))
        );
        assert_eq!(
            Input::parse("receipt RCP-001"),
            Ok(Input::Receipt("RCP-001".into()))
        );
    }

    #[test]
    fn customer_without_name_clears_it() {
        assert_eq!(Input::parse("customer"), Ok(Input::Customer(String::new())));
    }

    #[test]
    fn reports_usage_and_unknown_commands() {
        assert_eq!(Input::parse("add"), Err(InputError::Usage("add <id>")));
        assert_eq!(Input::parse("qty 1"), Err(InputError::Usage("qty <id> <n>")));
        assert_eq!(Input::parse("qty 1 lots"), Err(InputError::Usage("qty <id> <n>")));
        assert_eq!(Input::parse("receipt"), Err(InputError::Usage("receipt <no>")));
        assert!(matches!(
            Input::parse("add x"),
            Err(InputError::Domain(DomainError::InvalidId(_)))
        ));
        assert_eq!(
            Input::parse("refund 1"),
            Err(InputError::Unknown("refund".into()))
        );
    }
}

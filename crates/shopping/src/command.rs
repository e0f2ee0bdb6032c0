use anyhow::{Result, anyhow, bail};
use shared::{
    domain::{
        requests::ProductForm,
        view::{ProductFilter, Tab},
    },
    model::ProductId,
};
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  register <email> <password>      create an account and sign in
  login <email> <password>         sign in
  logout                           sign out
  list                             show the active tab
  menu                             open the side menu
  tab todo|bought                  switch tab
  show <id>                        product details
  add name | price | store [| description]
  edit <id> name | price | store [| description]
  toggle <id>                      mark bought / not bought
  delete <id>                      ask to delete, then `yes` or `no`
  filter [store] | [max price]     filter the list
  filter clear                     remove the filter
  theme                            switch dark mode
  retry                            reload after a failed load
  metrics                          print collected metrics
  help, quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Register { email: String, password: String },
    Login { email: String, password: String },
    Logout,
    List,
    Menu,
    Tab(Tab),
    Show(ProductId),
    Add(ProductForm),
    Edit(ProductId, ProductForm),
    Toggle(ProductId),
    Delete(ProductId),
    Confirm,
    Cancel,
    Filter(ProductFilter),
    ClearFilter,
    Theme,
    Retry,
    Metrics,
    Quit,
}

fn credentials(rest: &str) -> (String, String) {
    let mut parts = rest.split_whitespace();
    let email = parts.next().unwrap_or_default().to_string();
    let password = parts.next().unwrap_or_default().to_string();
    (email, password)
}

fn product_id(rest: &str) -> Result<ProductId> {
    let id = rest.trim();
    if id.is_empty() {
        bail!("missing product id");
    }
    Ok(ProductId::new(id))
}

/// `name | price | store [| description]`. Missing parts are left empty so
/// validation can report them.
fn product_form(rest: &str) -> ProductForm {
    let mut parts = rest.split('|').map(str::trim);
    ProductForm::new(
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
    )
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        let command = match verb.to_ascii_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "register" => {
                let (email, password) = credentials(rest);
                Command::Register { email, password }
            }
            "login" => {
                let (email, password) = credentials(rest);
                Command::Login { email, password }
            }
            "logout" => Command::Logout,
            "list" | "ls" => Command::List,
            "menu" => Command::Menu,
            "tab" => match rest.trim() {
                "todo" => Command::Tab(Tab::ToPurchase),
                "bought" => Command::Tab(Tab::Purchased),
                other => bail!("unknown tab '{other}', use todo or bought"),
            },
            "show" => Command::Show(product_id(rest)?),
            "add" => Command::Add(product_form(rest)),
            "edit" => {
                let rest = rest.trim();
                let (id, form) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| anyhow!("usage: edit <id> name | price | store"))?;
                Command::Edit(product_id(id)?, product_form(form))
            }
            "toggle" => Command::Toggle(product_id(rest)?),
            "delete" | "rm" => Command::Delete(product_id(rest)?),
            "yes" | "y" => Command::Confirm,
            "no" | "n" => Command::Cancel,
            "filter" if rest.trim() == "clear" => Command::ClearFilter,
            "filter" => {
                let (store, max_price) = rest.split_once('|').unwrap_or((rest, ""));
                Command::Filter(ProductFilter::new(store.trim(), max_price.trim()))
            }
            "theme" => Command::Theme,
            "retry" => Command::Retry,
            "metrics" => Command::Metrics,
            "quit" | "exit" | "q" => Command::Quit,
            "" => bail!("empty command"),
            other => bail!("unknown command '{other}', type help"),
        };

        Ok(command)
    }
}

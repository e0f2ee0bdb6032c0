use crate::command::{Command, HELP};
use anyhow::Result;
use shared::{
    abstract_trait::AuthServiceTrait,
    domain::{
        requests::{LoginRequest, RegisterRequest},
        view::{LoadState, Overlay, Tab},
    },
    errors::ServiceError,
    model::{Product, UserSession},
    service::ProductListService,
    state::AppState,
};
use tracing::{info, warn};

pub enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end over the shared services.
pub struct Shell {
    state: AppState,
    session: Option<UserSession>,
    list: Option<ProductListService>,
}

impl Shell {
    /// Resume a persisted session if there is one.
    pub async fn start(state: AppState) -> Result<Self> {
        let mut shell = Self {
            state,
            session: None,
            list: None,
        };

        if let Some(session) = shell.state.di_container.auth_service.current_session().await? {
            info!("Resuming session for {}", session.email);
            shell.open(session).await;
        } else {
            println!("Zaloguj się: login <email> <hasło>, lub załóż konto: register <email> <hasło>");
        }

        Ok(shell)
    }

    async fn open(&mut self, session: UserSession) {
        let mut list = self.state.di_container.product_list(&session);
        list.load_theme().await;
        let _ = list.load().await;

        println!("Zalogowano jako {}", session.email);
        self.session = Some(session);
        self.list = Some(list);
        self.render();
    }

    pub async fn handle(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(Flow::Quit),
            Command::Metrics => println!("{}", self.state.metrics_text().await?),
            Command::Register { email, password } => {
                let req = RegisterRequest::new(email, password);
                match self.state.di_container.auth_service.sign_up(&req).await {
                    Ok(session) => self.open(session).await,
                    Err(err) => report("Błąd rejestracji", &err),
                }
            }
            Command::Login { email, password } => {
                let req = LoginRequest::new(email, password);
                match self.state.di_container.auth_service.sign_in(&req).await {
                    Ok(session) => self.open(session).await,
                    Err(err) => report("Błąd logowania", &err),
                }
            }
            Command::Logout => {
                if self.session.is_none() {
                    println!("Nie jesteś zalogowany");
                } else {
                    self.state.di_container.auth_service.sign_out().await?;
                    self.session = None;
                    self.list = None;
                    println!("Wylogowano");
                }
            }
            other => self.handle_list(other).await,
        }

        Ok(Flow::Continue)
    }

    async fn handle_list(&mut self, command: Command) {
        let Some(list) = self.list.as_mut() else {
            println!("Najpierw się zaloguj");
            return;
        };

        let outcome = match command {
            Command::List => Ok(()),
            Command::Menu => {
                list.view_mut().open_sidebar();
                println!("Menu: tab todo | tab bought | theme | logout");
                return;
            }
            Command::Tab(tab) => {
                list.view_mut().select_tab(tab);
                Ok(())
            }
            Command::Show(id) => {
                match list.refresh_product(&id).await {
                    Ok(Some(product)) => print_details(product),
                    Ok(None) => println!("Nie znaleziono produktu"),
                    Err(err) => warn!("Refresh of {id} failed: {err}"),
                }
                return;
            }
            Command::Add(form) => list.add(form).await.map(|p| {
                println!("Dodano: {p}");
            }),
            Command::Edit(id, form) => list.edit(&id, form).await.map(|p| {
                println!("Zapisano: {p}");
            }),
            Command::Toggle(id) => list.toggle(&id).await.map(|_| ()),
            Command::Delete(id) => {
                match list.find(&id) {
                    Some(product) => {
                        println!("Czy na pewno chcesz usunąć \"{}\"? (yes/no)", product.name);
                        list.view_mut().confirm_delete(id);
                    }
                    None => println!("Nie znaleziono produktu"),
                }
                return;
            }
            Command::Confirm => match list.view().overlay.clone() {
                Overlay::ConfirmDelete(id) => list.delete(&id).await.map(|p| {
                    println!("Usunięto: {}", p.name);
                }),
                _ => return,
            },
            Command::Cancel => {
                list.view_mut().close_overlay();
                return;
            }
            Command::Filter(filter) => {
                list.view_mut().open_filter();
                list.view_mut().apply_filter(filter);
                Ok(())
            }
            Command::ClearFilter => {
                list.view_mut().clear_filter();
                Ok(())
            }
            Command::Theme => {
                if let Ok(dark) = list.toggle_theme().await {
                    println!("Tryb ciemny: {}", if dark { "włączony" } else { "wyłączony" });
                }
                Ok(())
            }
            Command::Retry => list.load().await.map(|_| ()),
            Command::Help
            | Command::Quit
            | Command::Metrics
            | Command::Register { .. }
            | Command::Login { .. }
            | Command::Logout => return,
        };

        if let Err(err) = outcome
            && let Some(fields) = err.field_errors()
        {
            for (field, message) in fields {
                println!("  {field}: {message}");
            }
            return;
        }

        self.render();
    }

    fn render(&mut self) {
        let Some(list) = self.list.as_mut() else {
            return;
        };

        if let Some(notice) = list.view().notice.clone() {
            println!("[{}] {}", notice.title, notice.message);
            list.view_mut().dismiss_notice();
        }

        let list: &ProductListService = list;
        match &list.view().load {
            LoadState::Loading => println!("Wczytywanie..."),
            LoadState::Failed(message) => println!("{message} (retry)"),
            LoadState::Ready => print_section(list),
        }
    }
}

fn report(title: &str, err: &ServiceError) {
    match err.field_errors() {
        Some(fields) => {
            for message in fields.values() {
                println!("[{title}] {message}");
            }
        }
        None => println!("[{title}] {err}"),
    }
}

fn print_section(list: &ProductListService) {
    let view = list.view();
    let section = list.section();

    let theme = if view.dark_mode { " (ciemny)" } else { "" };
    println!("== {}{theme} ==", section.title);
    if view.filter.is_active() {
        println!(
            "   filtr: sklep '{}', cena do '{}'",
            view.filter.store, view.filter.max_price
        );
    }

    if section.items.is_empty() {
        let empty = match view.tab {
            Tab::ToPurchase => "Brak produktów do zakupu",
            Tab::Purchased => "Brak kupionych produktów",
        };
        println!("   {empty}");
    }

    for product in &section.items {
        let mark = if product.purchased { "x" } else { " " };
        println!("[{mark}] {product}   #{}", product.id);
    }
}

fn print_details(product: &Product) {
    let status = if product.purchased { "Kupiony" } else { "Do kupienia" };
    println!("{}", product.name);
    println!("  Cena:   {}", product.price);
    println!("  Sklep:  {}", product.store);
    println!("  Opis:   {}", product.description);
    println!("  Status: {status}");
    println!("  ID:     {}", product.id);
}

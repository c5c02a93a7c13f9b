//! # Console Session
//!
//! The menu loop. Owns the transaction being rung up and the I/O handles,
//! so tests drive it with in-memory buffers instead of a terminal.
//!
//! ## Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Session::run                                     │
//! │                                                                         │
//! │   ┌──────────────┐   read line   ┌──────────────┐                      │
//! │   │  print menu  │──────────────►│ parse choice │                      │
//! │   └──────────────┘               └──────┬───────┘                      │
//! │          ▲                              │                               │
//! │          │        ┌─────────────────────┼──────────────────┐            │
//! │          │        ▼                     ▼                  ▼            │
//! │          │   invalid: report     action (1-6):       7 / EOF:          │
//! │          │   and re-prompt       prompt, call core,  say goodbye,      │
//! │          │        │              print outcome       return Ok         │
//! │          └────────┴─────────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Core errors never end the loop. Only I/O failures on the handles do.

use std::io::{self, BufRead, Write};

use kasir_core::validation::{parse_item_name, parse_price, parse_quantity, NewLineItem};
use kasir_core::{CoreError, DiscountSchedule, Transaction, TransactionIdAllocator};
use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::menu::{MenuChoice, UpdateField};
use crate::render::{self, Attempt};

/// One operator at one till.
pub struct Session<R, W> {
    input: R,
    output: W,
    store_name: String,
    schedule: DiscountSchedule,
    transaction: Transaction,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Opens a session on transaction number 1.
    pub fn new(config: &ShellConfig, input: R, output: W) -> Self {
        Self::with_allocator(config, &TransactionIdAllocator::new(), input, output)
    }

    /// Opens a session whose transaction takes the next id from `ids`.
    pub fn with_allocator(
        config: &ShellConfig,
        ids: &TransactionIdAllocator,
        input: R,
        output: W,
    ) -> Self {
        Session {
            input,
            output,
            store_name: config.store_name.clone(),
            schedule: config.discount.clone(),
            transaction: Transaction::new(ids),
        }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Consumes the session, returning the output handle.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the menu until Quit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        info!(
            store = %self.store_name,
            transaction_id = %self.transaction.id(),
            "session started"
        );
        writeln!(self.output, "Welcome to {}!", self.store_name)?;
        self.print_header()?;

        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Choose a menu [1-7]: ")? else {
                break;
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Quit) => break,
                Ok(choice) => {
                    debug!(choice = %choice, "menu selected");
                    self.dispatch(choice)?;
                }
                Err(err) => {
                    debug!(input = %line.trim(), "invalid menu selection");
                    writeln!(self.output, "Invalid choice: {err}.")?;
                }
            }
        }

        info!(transaction_id = %self.transaction.id(), "session ended");
        writeln!(self.output, "Thank you for shopping at {}!", self.store_name)?;
        self.output.flush()
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<()> {
        match choice {
            MenuChoice::ViewCart => self.view_cart(),
            MenuChoice::AddItem => self.add_item(),
            MenuChoice::UpdateItem => self.update_item(),
            MenuChoice::RemoveItem => self.remove_item(),
            MenuChoice::PriceBreakdown => self.price_breakdown(),
            MenuChoice::ResetTransaction => self.reset_transaction(),
            MenuChoice::Quit => Ok(()),
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub fn view_cart(&mut self) -> io::Result<()> {
        let table = render::order_table(&self.transaction.render_order());
        writeln!(self.output, "{table}")
    }

    pub fn add_item(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Item name: ")? else {
            return Ok(());
        };
        let Some(qty) = self.prompt("Quantity: ")? else {
            return Ok(());
        };
        let Some(price) = self.prompt("Price per quantity: ")? else {
            return Ok(());
        };

        let result = NewLineItem::parse(&name, &qty, &price)
            .map_err(CoreError::from)
            .and_then(|new| self.transaction.add_item(&new.name, new.qty, new.unit_price));

        match result {
            Ok(item) => {
                debug!(
                    transaction_id = %self.transaction.id(),
                    name = %item.name,
                    qty = item.qty,
                    unit_price = %item.unit_price,
                    "item added"
                );
                writeln!(self.output, "{}", render::added(&item))
            }
            Err(err) => self.report(Attempt::AddItem, &err),
        }
    }

    pub fn update_item(&mut self) -> io::Result<()> {
        if self.transaction.is_empty() {
            return writeln!(self.output, "{}", render::EMPTY_CART);
        }
        self.view_cart()?;

        let Some(raw_name) = self.prompt("Name of the item to update: ")? else {
            return Ok(());
        };
        let name = raw_name.trim().to_string();
        if !self.transaction.contains(&name) {
            return self.report(Attempt::UpdateItem, &CoreError::not_found(name));
        }

        writeln!(self.output, "What would you like to update?")?;
        for (n, field) in UpdateField::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", n + 1, field.label())?;
        }
        let Some(raw_field) = self.prompt("Choose a field [1-3]: ")? else {
            return Ok(());
        };
        let field = match raw_field.parse::<UpdateField>() {
            Ok(field) => field,
            Err(err) => return writeln!(self.output, "Invalid choice: {err}."),
        };

        let prompt = format!("New {}: ", field.label().to_lowercase());
        let Some(value) = self.prompt(&prompt)? else {
            return Ok(());
        };

        let outcome = match field {
            UpdateField::Name => parse_item_name(&value)
                .map_err(CoreError::from)
                .and_then(|new_name| self.transaction.update_item_name(&name, &new_name))
                .map(|item| render::renamed(&name, &item)),
            UpdateField::Quantity => parse_quantity(&value)
                .map_err(CoreError::from)
                .and_then(|qty| self.transaction.update_item_qty(&name, qty))
                .map(|item| render::quantity_changed(&item)),
            UpdateField::Price => parse_price(&value)
                .map_err(CoreError::from)
                .and_then(|price| self.transaction.update_item_price(&name, price))
                .map(|item| render::price_changed(&item)),
        };

        match outcome {
            Ok(message) => {
                debug!(
                    transaction_id = %self.transaction.id(),
                    name = %name,
                    field = field.label(),
                    value = %value.trim(),
                    "item updated"
                );
                writeln!(self.output, "{message}")
            }
            Err(err) => self.report(Attempt::Update(field), &err),
        }
    }

    pub fn remove_item(&mut self) -> io::Result<()> {
        if self.transaction.is_empty() {
            return writeln!(self.output, "{}", render::EMPTY_CART);
        }
        self.view_cart()?;

        let Some(raw_name) = self.prompt("Name of the item to remove: ")? else {
            return Ok(());
        };

        match self.transaction.remove_item(raw_name.trim()) {
            Ok(item) => {
                debug!(
                    transaction_id = %self.transaction.id(),
                    name = %item.name,
                    qty = item.qty,
                    "item removed"
                );
                writeln!(self.output, "{}", render::removed(&item))
            }
            Err(err) => self.report(Attempt::RemoveItem, &err),
        }
    }

    pub fn price_breakdown(&mut self) -> io::Result<()> {
        let prices = self.transaction.price_breakdown_with(&self.schedule);
        debug!(
            transaction_id = %self.transaction.id(),
            basket_price = %prices.basket_price,
            discount = %prices.discount,
            "price breakdown"
        );
        writeln!(self.output, "{}", render::breakdown(&prices))
    }

    pub fn reset_transaction(&mut self) -> io::Result<()> {
        let dropped = self.transaction.len();
        self.transaction.reset_transaction();
        debug!(
            transaction_id = %self.transaction.id(),
            dropped,
            "transaction reset"
        );
        writeln!(self.output, "{}", render::reset_done(self.transaction.id()))?;
        self.print_header()
    }

    // =========================================================================
    // I/O Helpers
    // =========================================================================

    fn print_header(&mut self) -> io::Result<()> {
        let header = render::transaction_header(self.transaction.id(), self.transaction.opened_at());
        writeln!(self.output, "{header}")
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "=== {} ===", self.store_name)?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{choice}")?;
        }
        Ok(())
    }

    /// Writes `label` and reads one line. `None` means end of input.
    /// Bytes that are not UTF-8 are read as U+FFFD.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn report(&mut self, attempt: Attempt, err: &CoreError) -> io::Result<()> {
        warn!(
            transaction_id = %self.transaction.id(),
            kind = ?err.kind(),
            error = %err,
            "{} failed",
            attempt.action()
        );
        writeln!(self.output, "{}", render::failure(attempt, err))
    }
}

use anyhow::{Result, bail};
use comfy_table::{Cell, ContentArrangement, Table};
use notefrais_app::{App, RouteBus};
use notefrais_core::bill::Bill;
use notefrais_core::view::RenderPlan;

use crate::cli::{Cli, Command};

pub fn run_with_deps(cli: Cli, app: &App<'_>, bus: &RouteBus) -> Result<()> {
    match cli.command {
        Some(Command::List) => run_list_command(app),
        Some(Command::New) => run_new_command(app, bus),
        None => run_root_command(app, bus),
    }
}

fn run_root_command(app: &App<'_>, bus: &RouteBus) -> Result<()> {
    let _ = notefrais_tui::run_root(app, bus)?;
    Ok(())
}

fn run_new_command(app: &App<'_>, bus: &RouteBus) -> Result<()> {
    let _ = notefrais_tui::run_new(app, bus)?;
    Ok(())
}

fn run_list_command(app: &App<'_>) -> Result<()> {
    let page = app.bills_page();
    let Some(state) = page.load() else {
        return Ok(());
    };

    match state.plan() {
        RenderPlan::Error(message) => bail!("{message}"),
        RenderPlan::List(bills) => print_bill_table(bills),
        RenderPlan::Loading => {}
    }

    Ok(())
}

fn print_bill_table(bills: &[Bill]) {
    if bills.is_empty() {
        println!("Aucune note de frais.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Type", "Nom", "Date", "Montant", "Statut", "Justificatif"]);

    for bill in bills {
        let receipt = if bill.has_receipt() {
            bill.file_name.as_str()
        } else {
            "-"
        };

        table.add_row(vec![
            Cell::new(bill.expense_type.as_str()),
            Cell::new(bill.name.as_str()),
            Cell::new(bill.date.as_str()),
            Cell::new(format!("{} €", bill.amount)),
            Cell::new(bill.status.label()),
            Cell::new(receipt),
        ]);
    }

    println!("{table}");
}

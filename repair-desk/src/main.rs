use repair_desk::{DeskConfig, DeskState, init_logger};
use shared::models::{ALL_CATEGORIES, StatusFilter, TicketStatus};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = DeskConfig::from_env();
    init_logger(Some(&config.log_level));

    let state = DeskState::initialize(config)?;
    let cfg = state.config();

    println!();
    println!("  Repair Desk");
    println!("  ─────────────────────────────────────────────");
    println!("  Clients           {}", state.clients.list().len());
    println!(
        "  Tickets           {} ({} pending, {} in progress)",
        state.tickets.list().len(),
        state
            .tickets
            .filter_by_status(StatusFilter::Only(TicketStatus::Pending))
            .len(),
        state
            .tickets
            .filter_by_status(StatusFilter::Only(TicketStatus::InProgress))
            .len(),
    );
    println!(
        "  Products          {} in {} categories",
        state.products.filtered("", ALL_CATEGORIES).len(),
        state.products.categories().len()
    );
    println!("  Orders            {}", state.orders.list().len());
    println!("  POS VAT rate      {:.0}%", cfg.pos_vat_rate * 100.0);
    println!("  Order tax rate    {:.0}%", cfg.order_tax_rate * 100.0);
    println!();

    tracing::info!("Repair desk ready");
    Ok(())
}

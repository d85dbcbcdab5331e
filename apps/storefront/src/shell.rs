//! # Line Shell
//!
//! Text front end for the storefront: one command per line, one reply per
//! command. Everything here goes through `commands`, exactly as a page
//! would.
//!
//! ```text
//! > products --sort=price-low hoco
//!   hoco-cable-c        HOCO X14 USB-C Charging Cable        $5.99
//!   hoco-charger-20w    HOCO C76A 20W PD Wall Charger       $12.99  -24%
//! > add hoco-cable-c
//!   Cart: 1 item(s), total $5.99
//! ```

use std::fmt::Write as _;

use shoptoshop_core::{ProductQuery, SortBy};

use crate::commands::cart::CartResponse;
use crate::commands::product::ProductCard;
use crate::commands::wishlist::WishlistResponse;
use crate::commands::{cart, config, product, wishlist};
use crate::error::ApiError;
use crate::App;

/// What the shell should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and read the next line.
    Output(String),
    Quit,
}

pub const HELP: &str = "\
Commands:
  products [--sort=S] [--category=C] [--brand=B] [--min=CENTS] [--max=CENTS] [text]
  product <id>            show one product
  categories | brands     sidebar listings
  accessories             accessories page
  add <id>                add one unit to the cart
  qty <id> <n>            set a quantity (below 1 removes)
  inc <id> | dec <id>     +/- buttons
  rm <id>                 remove from cart
  clear                   empty the cart
  cart                    show the cart
  wish <id> | unwish <id> save / unsave a product
  heart <id>              toggle saved
  move <id>               move a saved product into the cart
  wishlist                show saved products
  lang [code]             show or switch language (en, pt, es)
  t <key>                 translate a label key
  help | quit";

/// Runs one line against the app.
pub fn dispatch(app: &App, line: &str) -> Reply {
    let line = line.trim();
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let result = match command {
        "" => Ok(String::new()),
        "help" | "?" => Ok(HELP.to_string()),
        "quit" | "exit" => return Reply::Quit,
        "products" | "search" => parse_query(rest).and_then(|q| {
            product::search_products(&app.catalog, &app.store, &app.config, &q)
                .map(|cards| render_cards(&cards))
        }),
        "product" => with_id(rest).and_then(|id| {
            product::get_product(&app.catalog, &app.store, &app.config, id)
                .map(|card| render_cards(std::slice::from_ref(&card)))
        }),
        "accessories" => Ok(render_cards(&product::list_accessories(
            &app.catalog,
            &app.store,
            &app.config,
        ))),
        "categories" => Ok(render_categories(app)),
        "brands" => Ok(render_brands(app)),
        "add" => with_id(rest).and_then(|id| {
            cart::add_to_cart(&app.catalog, &app.store, &app.config, id)
                .map(|r| render_cart_summary(&r))
        }),
        "qty" => {
            let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            with_id(id).map(|id| {
                render_cart_summary(&cart::set_cart_quantity_from_input(
                    &app.store,
                    &app.config,
                    id,
                    text,
                ))
            })
        }
        "inc" => with_id(rest)
            .map(|id| render_cart_summary(&cart::increment_cart_item(&app.store, &app.config, id))),
        "dec" => with_id(rest)
            .map(|id| render_cart_summary(&cart::decrement_cart_item(&app.store, &app.config, id))),
        "rm" => with_id(rest)
            .map(|id| render_cart_summary(&cart::remove_from_cart(&app.store, &app.config, id))),
        "clear" => Ok(render_cart_summary(&cart::clear_cart(&app.store, &app.config))),
        "cart" => Ok(render_cart(app, &cart::get_cart(&app.store, &app.config))),
        "wish" => with_id(rest).and_then(|id| {
            wishlist::add_to_wishlist(&app.catalog, &app.store, id).map(|r| render_wishlist(app, &r))
        }),
        "unwish" => with_id(rest)
            .map(|id| render_wishlist(app, &wishlist::remove_from_wishlist(&app.store, id))),
        "heart" => with_id(rest).and_then(|id| {
            wishlist::toggle_wishlist(&app.catalog, &app.store, id).map(|t| {
                let state = if t.in_wishlist { "saved" } else { "removed" };
                format!("{} {} ({} saved)", id, state, t.wishlist_count)
            })
        }),
        "move" => with_id(rest).and_then(|id| {
            wishlist::move_to_cart(&app.store, &app.config, id).map(|r| {
                format!(
                    "{}\n{}",
                    render_cart_summary(&r.cart),
                    render_wishlist(app, &r.wishlist)
                )
            })
        }),
        "wishlist" => Ok(render_wishlist(app, &wishlist::get_wishlist(&app.store))),
        "lang" if rest.is_empty() => Ok(render_languages(&config::list_languages(&app.locale))),
        "lang" => config::set_language(&app.locale, rest).map(|opts| render_languages(&opts)),
        "t" => with_id(rest).map(|key| config::translate(&app.locale, key)),
        other => Err(ApiError::validation(format!(
            "Unknown command '{}'. Type 'help'.",
            other
        ))),
    };

    Reply::Output(match result {
        Ok(text) => text,
        Err(e) => format!("error: {}", e.message),
    })
}

fn with_id(rest: &str) -> Result<&str, ApiError> {
    match rest.split_whitespace().next() {
        Some(id) => Ok(id),
        None => Err(ApiError::validation("Missing argument")),
    }
}

/// Parses `products` arguments into a query.
///
/// `--key=value` flags may appear anywhere; the remaining words are the
/// search text.
fn parse_query(args: &str) -> Result<ProductQuery, ApiError> {
    let mut query = ProductQuery::default();
    let mut words = Vec::new();

    for token in args.split_whitespace() {
        let Some(flag) = token.strip_prefix("--") else {
            words.push(token);
            continue;
        };
        let (key, value) = flag
            .split_once('=')
            .ok_or_else(|| ApiError::validation(format!("Flag '{}' needs a value", token)))?;
        match key {
            "sort" => query.sort = value.parse::<SortBy>()?,
            "category" => query.category = Some(value.to_string()),
            "brand" => query.brand = Some(value.to_string()),
            "min" => query.min_price_cents = Some(parse_cents(value)?),
            "max" => query.max_price_cents = Some(parse_cents(value)?),
            _ => return Err(ApiError::validation(format!("Unknown flag '--{}'", key))),
        }
    }

    if !words.is_empty() {
        query.search = Some(words.join(" "));
    }
    Ok(query)
}

fn parse_cents(value: &str) -> Result<i64, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::validation(format!("'{}' is not a whole number of cents", value)))
}

// =============================================================================
// Rendering
// =============================================================================

fn render_cards(cards: &[ProductCard]) -> String {
    if cards.is_empty() {
        return "  (no products)".to_string();
    }

    let mut out = String::new();
    for card in cards {
        let _ = write!(
            out,
            "  {:<24} {:<40} {:>10}",
            card.product.id, card.product.name, card.price_display
        );
        if let Some(pct) = card.discount_percent {
            let _ = write!(out, "  -{}%", pct);
        }
        if !card.product.in_stock {
            out.push_str("  [out of stock]");
        }
        if card.in_cart {
            out.push_str("  [in cart]");
        }
        if card.in_wishlist {
            out.push_str("  ♥");
        }
        out.push('\n');
    }
    out.pop();
    out
}

fn render_cart_summary(response: &CartResponse) -> String {
    format!(
        "  Cart: {} item(s), total {}",
        response.totals.cart_count, response.totals.cart_total_display
    )
}

fn render_cart(app: &App, response: &CartResponse) -> String {
    if response.items.is_empty() {
        return format!("  {}", app.locale.t("emptyCart"));
    }

    let mut out = String::new();
    for entry in &response.items {
        let _ = writeln!(
            out,
            "  {:<24} x{:<5} {:>10}",
            entry.product.id,
            entry.quantity,
            app.config.format_currency(entry.line_total().cents())
        );
    }
    let _ = write!(
        out,
        "  {}: {}",
        app.locale.t("total"),
        response.totals.cart_total_display
    );
    out
}

fn render_wishlist(app: &App, response: &WishlistResponse) -> String {
    if response.items.is_empty() {
        return format!("  {}", app.locale.t("emptyWishlist"));
    }

    let mut out = format!("  {} ({}):", app.locale.t("wishlist"), response.wishlist_count);
    for product in &response.items {
        let _ = write!(out, "\n  {:<24} {}", product.id, product.name);
    }
    out
}

fn render_categories(app: &App) -> String {
    product::list_categories(&app.catalog, &app.locale)
        .iter()
        .map(|c| format!("  {:<14} {:<28} {}", c.slug, c.label, c.product_count))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_brands(app: &App) -> String {
    product::list_special_brands(&app.catalog)
        .iter()
        .map(|b| format!("  {:<8} {:<24} {}", b.name, b.tagline, b.product_count))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_languages(options: &[config::LanguageOption]) -> String {
    options
        .iter()
        .map(|o| format!("  {} {} {}", if o.active { "*" } else { " " }, o.code, o.name))
        .collect::<Vec<_>>()
        .join("\n")
}

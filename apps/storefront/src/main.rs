//! # ShopToShop Storefront Entry Point
//!
//! Starts the line shell. All setup lives in `lib.rs`.
//!
//! ```text
//! $ SHOPTOSHOP_LANGUAGE=pt shoptoshop
//! ShopToShop (Português). Type 'help'.
//! > add iph-13-screen
//!   Cart: 1 item(s), total $89.99
//! ```

#[tokio::main]
async fn main() {
    if let Err(e) = shoptoshop_storefront::run().await {
        eprintln!("shoptoshop: {}", e);
        std::process::exit(1);
    }
}

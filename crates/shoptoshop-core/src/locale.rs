//! # Locale
//!
//! Storefront languages and the key → string tables behind every label.
//!
//! Keys are the camelCase names used by the pages (`addToCart`,
//! `emptyWishlist`, `iphoneParts`, ...). A key with no entry is returned
//! unchanged, so a missing translation shows up as its key instead of an
//! empty label.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Language
// =============================================================================

/// A supported storefront language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Language {
    #[default]
    En,
    Pt,
    Es,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Pt, Language::Es];

    /// Two-letter code (`en`, `pt`, `es`).
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
            Language::Es => "es",
        }
    }

    /// Name shown in the language switcher.
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Pt => "Português",
            Language::Es => "Español",
        }
    }

    /// Parses a language tag.
    ///
    /// Case-insensitive; region subtags are ignored, so `pt-PT`, `PT` and
    /// `pt_BR` all give `Pt`.
    pub fn parse(tag: &str) -> Option<Language> {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(primary))
    }

    fn column(self) -> usize {
        match self {
            Language::En => 0,
            Language::Pt => 1,
            Language::Es => 2,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::parse(s).ok_or_else(|| ValidationError::InvalidFormat {
            field: "language".to_string(),
            reason: format!("unsupported language '{}'", s.trim()),
        })
    }
}

// =============================================================================
// Translator
// =============================================================================

/// Looks up labels for one language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Translator { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Returns the label for `key`, or `key` itself when there is none.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        match messages().get(key) {
            Some(row) => row[self.language.column()],
            None => key,
        }
    }

    /// Whether `key` has an entry.
    pub fn has(&self, key: &str) -> bool {
        messages().contains_key(key)
    }
}

fn messages() -> &'static HashMap<&'static str, [&'static str; 3]> {
    static MESSAGES: OnceLock<HashMap<&'static str, [&'static str; 3]>> = OnceLock::new();
    MESSAGES.get_or_init(|| MESSAGE_TABLE.iter().copied().collect())
}

// =============================================================================
// Message table
// =============================================================================

// key, [en, pt, es]
const MESSAGE_TABLE: &[(&str, [&str; 3])] = &[
    // Navigation
    ("home", ["Home", "Início", "Inicio"]),
    ("shop", ["Shop", "Loja", "Tienda"]),
    ("brands", ["Brands", "Marcas", "Marcas"]),
    ("accessories", ["Accessories", "Acessórios", "Accesorios"]),
    ("contact", ["Contact", "Contacto", "Contacto"]),
    ("aboutUs", ["About Us", "Sobre Nós", "Sobre Nosotros"]),
    ("search", ["Search products...", "Pesquisar produtos...", "Buscar productos..."]),
    ("cart", ["Cart", "Carrinho", "Carrito"]),
    ("wishlist", ["Wishlist", "Lista de Desejos", "Lista de Deseos"]),
    ("language", ["Language", "Idioma", "Idioma"]),
    ("login", ["Login", "Entrar", "Iniciar Sesión"]),
    ("logout", ["Logout", "Sair", "Cerrar Sesión"]),
    ("myAccount", ["My Account", "A Minha Conta", "Mi Cuenta"]),
    ("myDashboard", ["My Dashboard", "O Meu Painel", "Mi Panel"]),
    ("accountSettings", ["Account Settings", "Definições da Conta", "Configuración de la Cuenta"]),
    ("notifications", ["Notifications", "Notificações", "Notificaciones"]),
    // Home page
    ("heroTitle", ["Quality Mobile Parts", "Peças de Telemóvel de Qualidade", "Piezas de Móvil de Calidad"]),
    ("heroSubtitle", [
        "Screens, batteries and tools for every repair",
        "Ecrãs, baterias e ferramentas para cada reparação",
        "Pantallas, baterías y herramientas para cada reparación",
    ]),
    ("shopNow", ["Shop Now", "Comprar Agora", "Comprar Ahora"]),
    ("exploreBrands", ["Explore Brands", "Explorar Marcas", "Explorar Marcas"]),
    ("featuredProducts", ["Featured Products", "Produtos em Destaque", "Productos Destacados"]),
    ("newArrivals", ["New Arrivals", "Novidades", "Novedades"]),
    ("bestSellers", ["Best Sellers", "Mais Vendidos", "Más Vendidos"]),
    ("topCategories", ["Top Categories", "Categorias Principais", "Categorías Principales"]),
    ("specialBrands", ["Special Brands", "Marcas Especiais", "Marcas Especiales"]),
    ("whyChooseUs", ["Why Choose Us", "Porquê Escolher-nos", "Por Qué Elegirnos"]),
    ("securePayment", ["Secure Payment", "Pagamento Seguro", "Pago Seguro"]),
    ("viewAll", ["View All", "Ver Tudo", "Ver Todo"]),
    // Product cards and shop page
    ("addToCart", ["Add to Cart", "Adicionar ao Carrinho", "Añadir al Carrito"]),
    ("addToWishlist", ["Add to Wishlist", "Adicionar à Lista de Desejos", "Añadir a la Lista de Deseos"]),
    ("viewDetails", ["View Details", "Ver Detalhes", "Ver Detalles"]),
    ("outOfStock", ["Out of Stock", "Esgotado", "Agotado"]),
    ("new", ["New", "Novo", "Nuevo"]),
    ("sale", ["Sale", "Promoção", "Oferta"]),
    ("off", ["OFF", "DESC", "DTO"]),
    ("price", ["Price", "Preço", "Precio"]),
    ("brand", ["Brand", "Marca", "Marca"]),
    ("category", ["Category", "Categoria", "Categoría"]),
    ("categories", ["Categories", "Categorias", "Categorías"]),
    ("allCategories", ["All Categories", "Todas as Categorias", "Todas las Categorías"]),
    ("filterBy", ["Filter By", "Filtrar Por", "Filtrar Por"]),
    ("sortBy", ["Sort By", "Ordenar Por", "Ordenar Por"]),
    // Cart and wishlist pages
    ("quantity", ["Quantity", "Quantidade", "Cantidad"]),
    ("remove", ["Remove", "Remover", "Eliminar"]),
    ("subtotal", ["Subtotal", "Subtotal", "Subtotal"]),
    ("shipping", ["Shipping", "Envio", "Envío"]),
    ("calculated", ["Calculated at checkout", "Calculado no checkout", "Calculado al pagar"]),
    ("total", ["Total", "Total", "Total"]),
    ("checkout", ["Checkout", "Finalizar Compra", "Finalizar Compra"]),
    ("continueShopping", ["Continue Shopping", "Continuar a Comprar", "Seguir Comprando"]),
    ("emptyCart", ["Your cart is empty", "O seu carrinho está vazio", "Tu carrito está vacío"]),
    ("emptyWishlist", [
        "Your wishlist is empty",
        "A sua lista de desejos está vazia",
        "Tu lista de deseos está vacía",
    ]),
    // Contact page and footer
    ("getInTouch", ["Get in Touch", "Entre em Contacto", "Ponte en Contacto"]),
    ("contactInfo", ["Contact Info", "Informação de Contacto", "Información de Contacto"]),
    ("callUs", ["Call Us", "Ligue-nos", "Llámanos"]),
    ("email", ["Email", "Email", "Correo"]),
    ("phone", ["Phone", "Telefone", "Teléfono"]),
    ("address", ["Address", "Morada", "Dirección"]),
    ("yourName", ["Your Name", "O Seu Nome", "Tu Nombre"]),
    ("yourEmail", ["Your Email", "O Seu Email", "Tu Correo"]),
    ("yourPhone", ["Your Phone", "O Seu Telefone", "Tu Teléfono"]),
    ("subject", ["Subject", "Assunto", "Asunto"]),
    ("message", ["Message", "Mensagem", "Mensaje"]),
    ("sendMessage", ["Send Message", "Enviar Mensagem", "Enviar Mensaje"]),
    ("quickLinks", ["Quick Links", "Links Rápidos", "Enlaces Rápidos"]),
    ("support", ["Support", "Suporte", "Soporte"]),
    ("help", ["Help", "Ajuda", "Ayuda"]),
    ("faq", ["FAQ", "Perguntas Frequentes", "Preguntas Frecuentes"]),
    ("newsletter", ["Newsletter", "Newsletter", "Boletín"]),
    ("newsletterDesc", [
        "Get the latest deals in your inbox",
        "Receba as últimas promoções no seu email",
        "Recibe las últimas ofertas en tu correo",
    ]),
    ("enterEmail", ["Enter your email", "Introduza o seu email", "Introduce tu correo"]),
    ("subscribe", ["Subscribe", "Subscrever", "Suscribirse"]),
    ("privacyPolicy", ["Privacy Policy", "Política de Privacidade", "Política de Privacidad"]),
    ("termsConditions", ["Terms & Conditions", "Termos e Condições", "Términos y Condiciones"]),
    ("allRightsReserved", ["All rights reserved", "Todos os direitos reservados", "Todos los derechos reservados"]),
    // Categories
    ("iphoneParts", ["iPhone Parts", "Peças iPhone", "Piezas iPhone"]),
    ("samsungParts", ["Samsung Parts", "Peças Samsung", "Piezas Samsung"]),
    ("xiaomiParts", ["Xiaomi Parts", "Peças Xiaomi", "Piezas Xiaomi"]),
    ("oppoRenoParts", ["Oppo Reno Parts", "Peças Oppo Reno", "Piezas Oppo Reno"]),
    ("realmeParts", ["Realme Parts", "Peças Realme", "Piezas Realme"]),
    ("huaweiParts", ["Huawei Parts", "Peças Huawei", "Piezas Huawei"]),
    ("onePlusParts", ["OnePlus Parts", "Peças OnePlus", "Piezas OnePlus"]),
    ("motorolaParts", ["Motorola Parts", "Peças Motorola", "Piezas Motorola"]),
    ("alcatelParts", ["Alcatel Parts", "Peças Alcatel", "Piezas Alcatel"]),
    ("tclParts", ["TCL Parts", "Peças TCL", "Piezas TCL"]),
    ("zteParts", ["ZTE Parts", "Peças ZTE", "Piezas ZTE"]),
    ("vivoParts", ["Vivo Parts", "Peças Vivo", "Piezas Vivo"]),
    ("nokiaParts", ["Nokia Parts", "Peças Nokia", "Piezas Nokia"]),
    ("googlePixelParts", ["Google Pixel Parts", "Peças Google Pixel", "Piezas Google Pixel"]),
    ("tablets", ["Tablets", "Tablets", "Tabletas"]),
    ("lgParts", ["LG Parts", "Peças LG", "Piezas LG"]),
    ("otherParts", ["Other Parts", "Outras Peças", "Otras Piezas"]),
    ("repairTools", ["Repair Tools", "Ferramentas de Reparação", "Herramientas de Reparación"]),
];

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATEGORIES;
    use std::collections::HashSet;

    #[test]
    fn test_language_parse() {
        assert_eq!(Language::parse("en"), Some(Language::En));
        assert_eq!(Language::parse("PT"), Some(Language::Pt));
        assert_eq!(Language::parse("pt-PT"), Some(Language::Pt));
        assert_eq!(Language::parse("es_ES"), Some(Language::Es));
        assert_eq!(Language::parse("fr"), None);
        assert_eq!(Language::parse(""), None);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_code_roundtrip() {
        for lang in Language::ALL {
            assert_eq!(Language::parse(lang.code()), Some(lang));
        }
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_translate_known_key() {
        assert_eq!(Translator::new(Language::En).t("addToCart"), "Add to Cart");
        assert_eq!(Translator::new(Language::Pt).t("cart"), "Carrinho");
        assert_eq!(Translator::new(Language::Es).t("wishlist"), "Lista de Deseos");
    }

    #[test]
    fn test_translate_missing_key_returns_key() {
        let translator = Translator::new(Language::Pt);
        assert_eq!(translator.t("noSuchKey"), "noSuchKey");
        assert!(!translator.has("noSuchKey"));
    }

    #[test]
    fn test_table_has_no_duplicate_keys() {
        let keys: HashSet<&str> = MESSAGE_TABLE.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), MESSAGE_TABLE.len());
    }

    #[test]
    fn test_every_category_is_translated() {
        let translator = Translator::default();
        for category in CATEGORIES {
            assert!(translator.has(category.key), "missing {}", category.key);
        }
        assert!(translator.has("accessories"));
    }
}

//! HTML pages rendered with tera.
//!
//! Templates are compiled into the binary and auto-escaped (`.html`).
//! Page structs hold display-ready values only.

use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};
use wantbox_shared::{User, WishlistEntry, WishlistItem};

use crate::error::{ApiError, ApiResult};

pub const PAGE_TITLE: &str = "Wantbox";

pub const INDEX: &str = "index.html";
pub const EDIT_ITEM: &str = "edit_item.html";
pub const ADD_USER: &str = "add_user.html";

pub fn load() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        (INDEX, include_str!("../templates/index.html")),
        (EDIT_ITEM, include_str!("../templates/edit_item.html")),
        (ADD_USER, include_str!("../templates/add_user.html")),
    ])?;
    Ok(tera)
}

pub fn render<T: Serialize>(tera: &Tera, template: &str, page: &T) -> ApiResult<Html<String>> {
    let context = Context::from_serialize(page).map_err(|err| render_failed(template, err))?;
    tera.render(template, &context)
        .map(Html)
        .map_err(|err| render_failed(template, err))
}

fn render_failed(template: &str, err: tera::Error) -> ApiError {
    tracing::error!(template = template, error = ?err, "template rendering failed");
    ApiError::internal("Failed to render page")
}

fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

#[derive(Debug, Serialize)]
pub struct ItemRow {
    pub id: i64,
    pub item_name: String,
    pub price: String,
    pub url: String,
    pub owner_name: String,
}

impl From<WishlistEntry> for ItemRow {
    fn from(entry: WishlistEntry) -> Self {
        ItemRow {
            id: entry.item.id,
            item_name: entry.item.item_name,
            price: format_price(entry.item.price),
            url: entry.item.url,
            owner_name: entry.owner_name,
        }
    }
}

/// Prefills the edit form, so the price round-trips unrounded
#[derive(Debug, Serialize)]
pub struct EditableItem {
    pub id: i64,
    pub item_name: String,
    pub price: String,
    pub url: String,
    pub user_id: i64,
}

impl From<WishlistItem> for EditableItem {
    fn from(item: WishlistItem) -> Self {
        EditableItem {
            id: item.id,
            item_name: item.item_name,
            price: item.price.to_string(),
            url: item.url,
            user_id: item.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IndexPage {
    pub page_title: &'static str,
    pub items: Vec<ItemRow>,
    pub users: Vec<User>,
}

impl IndexPage {
    pub fn new(entries: Vec<WishlistEntry>, users: Vec<User>) -> Self {
        IndexPage {
            page_title: PAGE_TITLE,
            items: entries.into_iter().map(ItemRow::from).collect(),
            users,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditItemPage {
    pub page_title: &'static str,
    pub item: EditableItem,
    pub users: Vec<User>,
}

impl EditItemPage {
    pub fn new(item: WishlistItem, users: Vec<User>) -> Self {
        EditItemPage {
            page_title: PAGE_TITLE,
            item: item.into(),
            users,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddUserPage {
    pub page_title: &'static str,
}

impl Default for AddUserPage {
    fn default() -> Self {
        AddUserPage {
            page_title: PAGE_TITLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_item() -> WishlistItem {
        WishlistItem {
            id: 2,
            item_name: "Synth <deluxe>".to_string(),
            url: "www.google.com".to_string(),
            price: 500.0,
            user_id: 1,
            created_at: NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    fn users() -> Vec<User> {
        vec![
            User {
                id: 1,
                name: "Augustus".to_string(),
            },
            User {
                id: 2,
                name: "Magalhaes".to_string(),
            },
        ]
    }

    #[test]
    fn test_all_templates_load() {
        let tera = load().unwrap();
        let names: Vec<_> = tera.get_template_names().collect();
        for name in [INDEX, EDIT_ITEM, ADD_USER] {
            assert!(names.contains(&name), "missing template {}", name);
        }
    }

    #[test]
    fn test_index_renders_escaped_rows() {
        let tera = load().unwrap();
        let entry = WishlistEntry {
            item: sample_item(),
            owner_name: "Augustus".to_string(),
        };
        let Html(html) = render(&tera, INDEX, &IndexPage::new(vec![entry], users())).unwrap();

        assert!(html.contains("Synth &lt;deluxe&gt;"));
        assert!(html.contains("500.00"));
        assert!(html.contains("/wishlist/2/edit"));
        assert!(html.contains("Magalhaes"));
    }

    #[test]
    fn test_index_without_users_points_to_registration() {
        let tera = load().unwrap();
        let Html(html) = render(&tera, INDEX, &IndexPage::new(vec![], vec![])).unwrap();
        assert!(html.contains("Nothing on the wishlist yet."));
        assert!(!html.contains("action=\"/wishlist\""));
    }

    #[test]
    fn test_edit_page_preselects_owner() {
        let tera = load().unwrap();
        let Html(html) = render(&tera, EDIT_ITEM, &EditItemPage::new(sample_item(), users())).unwrap();
        assert!(html.contains("<option value=\"1\" selected>Augustus</option>"));
        assert!(html.contains("<option value=\"2\">Magalhaes</option>"));
        assert!(html.contains("value=\"500\""));
    }

    #[test]
    fn test_edit_page_keeps_exact_price() {
        let tera = load().unwrap();
        let mut item = sample_item();
        item.price = 19.999;
        let Html(html) = render(&tera, EDIT_ITEM, &EditItemPage::new(item, users())).unwrap();
        assert!(html.contains("value=\"19.999\""));
    }
}

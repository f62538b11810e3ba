use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::Rng;
use wantbox_shared::{NewUser, User, UserForm, Validatable, WishlistItemForm, WishlistStore};

/// Users registered by `--demo`, in id order
pub const DEMO_USERS: &[&str] = &["Augustus", "Magalhaes"];

/// Items added by `--demo`: (name, price, index into DEMO_USERS)
pub const DEMO_ITEMS: &[(&str, &str, usize)] = &[
    ("Rudder Pedals", "350.00", 0),
    ("Synth", "500.00", 0),
    ("Saucony shoes", "99.00", 1),
];

const DEMO_URL: &str = "www.google.com";

const ITEM_NAMES: &[&str] = &[
    "Espresso Machine",
    "Mechanical Keyboard",
    "Trail Running Shoes",
    "Noise Cancelling Headphones",
    "Cast Iron Skillet",
    "Telescope",
    "Drum Machine",
    "Road Bike Helmet",
    "Hardcover Atlas",
    "Film Camera",
    "Bonsai Starter Kit",
    "Chess Set",
];

const SHOPS: &[&str] = &[
    "https://shop.example.com/item",
    "https://market.example.org/p",
    "https://store.example.net/products",
];

/// Register the demo users and their items.
/// Returns the number of (users, items) created.
pub async fn create_demo_data(store: &WishlistStore) -> Result<(usize, usize)> {
    let mut user_ids = Vec::with_capacity(DEMO_USERS.len());
    for name in DEMO_USERS {
        let user = UserForm {
            username: name.to_string(),
        }
        .validate()?;
        let id = store
            .create_user(&user)
            .await
            .with_context(|| format!("Failed to create user {}", name))?;
        user_ids.push(id);
    }

    for (name, price, owner) in DEMO_ITEMS {
        let item = WishlistItemForm {
            itemname: name.to_string(),
            price: price.to_string(),
            url: DEMO_URL.to_string(),
            user: user_ids[*owner].to_string(),
        }
        .validate()?;
        store
            .create_item(&item)
            .await
            .with_context(|| format!("Failed to create item {}", name))?;
    }

    Ok((user_ids.len(), DEMO_ITEMS.len()))
}

/// Add `count` random items spread over the existing users
pub async fn create_random_items(
    store: &WishlistStore,
    count: usize,
    rng: &mut StdRng,
) -> Result<usize> {
    if count == 0 {
        return Ok(0);
    }

    let mut users = store.list_users().await.context("Failed to list users")?;
    if users.is_empty() {
        let id = store
            .create_user(&NewUser {
                name: "Guest".to_string(),
            })
            .await
            .context("Failed to create fallback user")?;
        users.push(User {
            id,
            name: "Guest".to_string(),
        });
    }

    for i in 0..count {
        let name = ITEM_NAMES[rng.gen_range(0..ITEM_NAMES.len())];
        let owner = &users[rng.gen_range(0..users.len())];
        let cents: u32 = rng.gen_range(500..150_000);

        let item = WishlistItemForm {
            itemname: name.to_string(),
            price: format!("{}.{:02}", cents / 100, cents % 100),
            url: format!("{}/{}", SHOPS[rng.gen_range(0..SHOPS.len())], i + 1),
            user: owner.id.to_string(),
        }
        .validate()?;

        store
            .create_item(&item)
            .await
            .with_context(|| format!("Failed to create random item #{}", i + 1))?;
    }

    Ok(count)
}

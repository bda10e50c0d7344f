//! Integration tests for Category, Product and Order repositories using
//! in-memory SurrealDB.

use saahaz_core::error::SaahazError;
use saahaz_core::models::category::{CreateCategory, UpdateCategory};
use saahaz_core::models::order::{
    CreateOrder, DeliveryOption, OrderItem, OrderStatus, PaymentMethod,
};
use saahaz_core::models::product::{CreateProduct, ProductFilter, UpdateProduct};
use saahaz_core::repository::{CategoryRepository, OrderRepository, ProductRepository};
use saahaz_db::repository::{
    SurrealCategoryRepository, SurrealOrderRepository, SurrealProductRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    saahaz_db::run_migrations(&db).await.unwrap();
    db
}

fn shirt(category_id: Uuid, price: f64, featured: bool) -> CreateProduct {
    CreateProduct {
        name: "Lawn Kurta".into(),
        description: "Printed summer lawn".into(),
        price,
        category_id,
        images: vec!["https://cdn.test/k.jpg".into()],
        sizes: vec!["S".into(), "M".into()],
        colors: vec!["teal".into()],
        inventory: 10,
        featured,
    }
}

// -----------------------------------------------------------------------
// Categories
// -----------------------------------------------------------------------

#[tokio::test]
async fn category_crud() {
    let repo = SurrealCategoryRepository::new(setup().await);

    let cat = repo
        .create(CreateCategory {
            name: "Women".into(),
            description: Some("Eastern wear".into()),
            image: None,
        })
        .await
        .unwrap();
    assert_eq!(repo.get_by_id(cat.id).await.unwrap().name, "Women");

    let renamed = repo
        .update(
            cat.id,
            UpdateCategory {
                name: Some("Womenswear".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Womenswear");
    assert_eq!(renamed.description.as_deref(), Some("Eastern wear"));

    assert_eq!(repo.list().await.unwrap().len(), 1);

    repo.delete(cat.id).await.unwrap();
    let err = repo.delete(cat.id).await.unwrap_err();
    assert!(matches!(err, SaahazError::NotFound { .. }), "got: {err:?}");
    assert!(repo.list().await.unwrap().is_empty());
}

// -----------------------------------------------------------------------
// Products
// -----------------------------------------------------------------------

#[tokio::test]
async fn product_list_filters() {
    let repo = SurrealProductRepository::new(setup().await);
    let women = Uuid::new_v4();
    let men = Uuid::new_v4();

    repo.create(shirt(women, 4500.0, true)).await.unwrap();
    repo.create(shirt(women, 3200.0, false)).await.unwrap();
    repo.create(shirt(men, 2800.0, true)).await.unwrap();

    let all = repo.list(ProductFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let in_women = repo
        .list(ProductFilter {
            category_id: Some(women),
            featured: None,
        })
        .await
        .unwrap();
    assert_eq!(in_women.len(), 2);
    assert!(in_women.iter().all(|p| p.category_id == women));

    let featured_women = repo
        .list(ProductFilter {
            category_id: Some(women),
            featured: Some(true),
        })
        .await
        .unwrap();
    assert_eq!(featured_women.len(), 1);
    assert_eq!(featured_women[0].price, 4500.0);
}

#[tokio::test]
async fn product_update_and_delete() {
    let repo = SurrealProductRepository::new(setup().await);
    let product = repo.create(shirt(Uuid::new_v4(), 1000.0, false)).await.unwrap();
    assert_eq!(product.sizes, vec!["S".to_string(), "M".to_string()]);

    let updated = repo
        .update(
            product.id,
            UpdateProduct {
                price: Some(1250.5),
                featured: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.price, 1250.5);
    assert!(updated.featured);
    assert_eq!(updated.name, "Lawn Kurta");

    repo.delete(product.id).await.unwrap();
    let err = repo.get_by_id(product.id).await.unwrap_err();
    assert!(matches!(err, SaahazError::NotFound { .. }), "got: {err:?}");

    let err = repo
        .update(product.id, UpdateProduct::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SaahazError::NotFound { .. }), "got: {err:?}");
}

// -----------------------------------------------------------------------
// Orders
// -----------------------------------------------------------------------

fn order_for(user_id: Uuid) -> CreateOrder {
    CreateOrder {
        user_id,
        items: vec![OrderItem {
            product_id: Uuid::new_v4(),
            quantity: 2,
            size: Some("M".into()),
            color: None,
        }],
        subtotal: 9000.0,
        delivery_charge: 200.0,
        total: 9200.0,
        delivery_address: "House 4, Street 9, Lahore".into(),
        phone: "0321-0000000".into(),
        delivery_option: DeliveryOption::Express,
        payment_method: PaymentMethod::CashOnDelivery,
    }
}

#[tokio::test]
async fn order_create_and_fetch() {
    let repo = SurrealOrderRepository::new(setup().await);
    let user = Uuid::new_v4();

    let order = repo.create(order_for(user)).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.delivery_option, DeliveryOption::Express);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].size.as_deref(), Some("M"));

    let fetched = repo.get_by_id(order.id).await.unwrap();
    assert_eq!(fetched.total, 9200.0);
    assert_eq!(fetched.payment_method, PaymentMethod::CashOnDelivery);
    assert_eq!(fetched.user_id, user);
}

#[tokio::test]
async fn order_listing_by_user() {
    let repo = SurrealOrderRepository::new(setup().await);
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.create(order_for(alice)).await.unwrap();
    repo.create(order_for(alice)).await.unwrap();
    repo.create(order_for(bob)).await.unwrap();

    assert_eq!(repo.list_all().await.unwrap().len(), 3);
    let mine = repo.list_by_user(alice).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|o| o.user_id == alice));
}

#[tokio::test]
async fn order_status_update() {
    let repo = SurrealOrderRepository::new(setup().await);
    let order = repo.create(order_for(Uuid::new_v4())).await.unwrap();

    let confirmed = repo
        .update_status(order.id, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);
    assert!(confirmed.updated_at >= order.updated_at);

    let err = repo
        .update_status(Uuid::new_v4(), OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert!(matches!(err, SaahazError::NotFound { .. }), "got: {err:?}");
}

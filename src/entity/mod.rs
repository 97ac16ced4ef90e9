pub mod accounts;
pub mod cart_items;
pub mod orders;
pub mod owners;
pub mod providers;
pub mod service_reviews;
pub mod services;

pub use accounts::Entity as Accounts;
pub use cart_items::Entity as CartItems;
pub use orders::Entity as Orders;
pub use owners::Entity as Owners;
pub use providers::Entity as Providers;
pub use service_reviews::Entity as ServiceReviews;
pub use services::Entity as Services;

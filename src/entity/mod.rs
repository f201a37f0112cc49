pub mod attributes;
pub mod categories;
pub mod order_items;
pub mod orders;
pub mod product_attributes;
pub mod product_categories;
pub mod products;
pub mod sellers;

pub use attributes::Entity as Attributes;
pub use categories::Entity as Categories;
pub use order_items::Entity as OrderItems;
pub use orders::Entity as Orders;
pub use product_attributes::Entity as ProductAttributes;
pub use product_categories::Entity as ProductCategories;
pub use products::Entity as Products;
pub use sellers::Entity as Sellers;

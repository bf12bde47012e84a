//! Sea-ORM entity definitions
//!
//! A travel post is normalised into a `travels` row, its `albums` rows and links
//! through `travel_companies` to globally shared `companies` rows.

pub mod album;
pub mod company;
pub mod travel;
pub mod travel_company;

pub use album::Entity as Album;
pub use company::Entity as Company;
pub use travel::Entity as Travel;
pub use travel_company::Entity as TravelCompany;

pub mod outlet_repo;

pub use outlet_repo::OutletRepository;

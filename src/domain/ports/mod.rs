pub mod cinema_repository;
pub mod distributed_lock;

// Chapter reader managers
// Stateful components: the persistent store and the chapter dropdown.

pub mod dropdown_manager;
pub mod storage_manager;

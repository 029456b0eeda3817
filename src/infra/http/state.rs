use std::sync::Arc;

use crate::application::backup::BackupService;
use crate::application::store::TodoStore;

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<TodoStore>,
    pub backup: Arc<BackupService>,
}

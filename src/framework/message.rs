use super::entity::StoreRecord;
use super::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by collection actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Message type sent to a collection actor.
///
/// The variants map onto the operations the backing store offers for every table: the CRUD
/// set, a whole-collection `List` read, and `Action` for record-specific logic that doesn't
/// fit CRUD (such as decrementing stock).
///
/// The enum is generic over `T: StoreRecord` and uses its associated types, so an expense
/// payload can never reach the inventory collection.
#[derive(Debug)]
pub enum StoreRequest<T: StoreRecord> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

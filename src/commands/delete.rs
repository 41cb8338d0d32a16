//! Delete command handler.

use crate::args::DeleteSubcommand;
use crate::commands::{session, Out};
use crate::store::Mode;
use crate::tracker::noun;
use crate::{Config, Result};

/// Deletes one expense, study session or todo by id. An id the owner has no record for is not an
/// error; nothing is deleted.
pub async fn delete(config: Config, mode: Mode, entity: DeleteSubcommand) -> Result<Out<String>> {
    let table = entity.table();
    let id = entity.id().to_string();
    let mut tracker = session(&config, mode).await?;
    Ok(if tracker.delete(table, &id).await? {
        Out::new(format!("Deleted {} {id}", noun(table)), id)
    } else {
        Out::new_message(format!("No {} with id {id}, nothing deleted", noun(table)))
    })
}

use tracing::debug;

use crate::task::TaskId;

pub const ROW_ID_PREFIX: &str = "task-";
pub const DRAG_MIME: &str = "text/plain";

/// DOM id of a rendered row, also used as the drag payload.
pub fn row_dom_id(id: TaskId) -> String {
    format!("{ROW_ID_PREFIX}{id}")
}

pub fn parse_row_dom_id(raw: &str) -> Option<TaskId> {
    raw.trim()
        .strip_prefix(ROW_ID_PREFIX)
        .and_then(|digits| digits.parse::<u64>().ok())
        .map(TaskId)
}

/// Transient state of one drag gesture. Only drives styling; the list
/// order changes solely through [`DragSession::drop_on`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragSession {
    source: Option<TaskId>,
    over: Option<TaskId>,
}

impl DragSession {
    pub fn start(&mut self, id: TaskId) {
        self.source = Some(id);
        self.over = None;
    }

    /// Marks `id` as the hovered drop target. Returns whether anything changed.
    pub fn enter(&mut self, id: TaskId) -> bool {
        if self.over == Some(id) {
            return false;
        }
        self.over = Some(id);
        true
    }

    pub fn end(&mut self) {
        self.source = None;
        self.over = None;
    }

    pub fn is_dragging(&self, id: TaskId) -> bool {
        self.source == Some(id)
    }

    pub fn is_over(&self, id: TaskId) -> bool {
        self.over == Some(id)
    }

    /// Ends the gesture and resolves the new order. `payload` is the source
    /// read back from the drop event and wins over the recorded source.
    pub fn drop_on(
        &mut self,
        payload: Option<TaskId>,
        target: TaskId,
        order: &[TaskId],
    ) -> Option<Vec<TaskId>> {
        let source = payload.or(self.source);
        self.end();

        let Some(source) = source else {
            debug!(%target, "drop without a source row");
            return None;
        };
        resolve_drop(order, source, target)
    }
}

/// Moves `source` next to `target`: after it when dragging down, before it
/// when dragging up. `None` for self-drops or ids missing from `order`.
pub fn resolve_drop(order: &[TaskId], source: TaskId, target: TaskId) -> Option<Vec<TaskId>> {
    if source == target {
        debug!(%source, "drop on itself ignored");
        return None;
    }
    let source_idx = order.iter().position(|id| *id == source)?;
    let target_idx = order.iter().position(|id| *id == target)?;

    let mut next = order.to_vec();
    let moved = next.remove(source_idx);
    let target_now = next.iter().position(|id| *id == target)?;
    let insert_at = if source_idx < target_idx {
        target_now + 1
    } else {
        target_now
    };
    next.insert(insert_at, moved);
    Some(next)
}

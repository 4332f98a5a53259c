use crate::areas::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// Walk from a commit to the root, following parent links
///
/// Each call to `CommitGraph::history` starts a fresh walk. The walk yields at
/// most as many commits as the graph holds, so it terminates even if the
/// parent chain were ever to loop.
#[derive(Debug, Clone)]
pub struct History<'g> {
    graph: &'g CommitGraph,
    next: Option<ObjectId>,
    remaining: usize,
}

impl<'g> History<'g> {
    pub(crate) fn new(graph: &'g CommitGraph, start: Option<ObjectId>) -> Self {
        History {
            graph,
            next: start,
            remaining: graph.len(),
        }
    }
}

impl<'g> Iterator for History<'g> {
    type Item = &'g Commit;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let graph = self.graph;
        let commit = self.next.take().and_then(|oid| graph.commit(&oid))?;
        // move to the parent for the next iteration
        self.next = commit.parent().cloned();
        self.remaining -= 1;

        Some(commit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

//! Bottom-up traversal of a tree-sitter tree.
//!
//! Children are visited before their parent and their results are handed to
//! the parent's visitor call together with the grammar field name each child
//! was reached through (`key`, `value`, ...). The traversal keeps its own
//! stack, so deeply nested documents cannot overflow the call stack.

use tree_sitter::{Node, TreeCursor};

/// A visited child as seen by its parent.
#[derive(Debug)]
pub struct VisitedChild<T> {
    pub kind: &'static str,
    pub field_name: Option<&'static str>,
    pub result: T,
}

#[derive(Debug)]
enum Phase<'tree, T> {
    Enter(Node<'tree>, Option<&'static str>),
    GoToSiblings(Node<'tree>, Option<&'static str>, Vec<VisitedChild<T>>),
    Exit(Node<'tree>),
}

/// Fold the tree under `cursor` bottom-up.
///
/// `visitor` receives each node with the results of all of its children,
/// named and anonymous, in document order. Returns the root's result.
pub fn bottomup_traverse<'tree, T, F>(cursor: &mut TreeCursor<'tree>, visitor: &mut F) -> T
where
    F: FnMut(&Node<'tree>, Vec<VisitedChild<T>>) -> T,
{
    let mut stack: Vec<Phase<'tree, T>> = vec![Phase::Enter(cursor.node(), cursor.field_name())];

    loop {
        let Some(top) = stack.pop() else {
            unreachable!("traversal stack emptied before the root was exited");
        };
        match top {
            Phase::Enter(node, field_name) => {
                stack.push(Phase::GoToSiblings(node, field_name, Vec::new()));
                if cursor.goto_first_child() {
                    stack.push(Phase::Enter(cursor.node(), cursor.field_name()));
                } else {
                    stack.push(Phase::Exit(node));
                }
            }
            Phase::GoToSiblings(node, field_name, children) => {
                stack.push(Phase::GoToSiblings(node, field_name, children));
                if cursor.goto_next_sibling() {
                    stack.push(Phase::Enter(cursor.node(), cursor.field_name()));
                } else {
                    stack.push(Phase::Exit(node));
                    cursor.goto_parent();
                }
            }
            Phase::Exit(node) => {
                let Some(Phase::GoToSiblings(_, field_name, children)) = stack.pop() else {
                    unreachable!("exit without a matching sibling frame");
                };
                let visited = VisitedChild {
                    kind: node.kind(),
                    field_name,
                    result: visitor(&node, children),
                };
                match stack.last_mut() {
                    None => return visited.result,
                    Some(Phase::GoToSiblings(_, _, siblings)) => siblings.push(visited),
                    Some(_) => unreachable!("exit returned into a non-sibling frame"),
                }
            }
        }
    }
}

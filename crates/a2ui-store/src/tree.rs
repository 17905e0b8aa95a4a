//! Derivation of the sub-agent forest from the flat parent-pointer list.

use std::collections::HashMap;

use a2ui_protocol::SubAgent;

/// Build the sub-agent forest from the flat stored list.
///
/// Pure function of its input; the forest is rebuilt on every call so it
/// always reflects the latest flat state. A `parent_id` that is missing,
/// self-referential, or would close a cycle makes the node a root, so every
/// stored node appears exactly once and derivation always terminates.
pub fn build_sub_agent_tree(agents: &[SubAgent]) -> Vec<SubAgent> {
    let index: HashMap<&str, usize> = agents
        .iter()
        .enumerate()
        .map(|(i, agent)| (agent.id.as_str(), i))
        .collect();

    let mut parent: Vec<Option<usize>> = agents
        .iter()
        .map(|agent| {
            agent
                .parent_id
                .as_deref()
                .filter(|pid| *pid != agent.id)
                .and_then(|pid| index.get(pid).copied())
        })
        .collect();

    // Break cycles: walk each node's parent chain; a chain that returns to
    // the node itself promotes that node to a root.
    for start in 0..agents.len() {
        let mut cursor = parent[start];
        let mut steps = 0;
        while let Some(next) = cursor {
            if next == start {
                parent[start] = None;
                break;
            }
            steps += 1;
            if steps > agents.len() {
                break;
            }
            cursor = parent[next];
        }
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); agents.len()];
    let mut roots = Vec::new();
    for (i, p) in parent.iter().enumerate() {
        match p {
            Some(parent_index) => children[*parent_index].push(i),
            None => roots.push(i),
        }
    }

    roots
        .into_iter()
        .map(|root| assemble(root, agents, &children))
        .collect()
}

fn assemble(index: usize, agents: &[SubAgent], children: &[Vec<usize>]) -> SubAgent {
    let mut node = agents[index].clone();
    node.children = children[index]
        .iter()
        .map(|child| assemble(*child, agents, children))
        .collect();
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2ui_protocol::Status;

    fn agent(id: &str, parent: Option<&str>) -> SubAgent {
        SubAgent {
            id: id.to_string(),
            label: id.to_uppercase(),
            status: Status::Active,
            parent_id: parent.map(str::to_string),
            created_at: 0,
            completed_at: None,
            task: None,
            children: Vec::new(),
        }
    }

    fn count_nodes(forest: &[SubAgent]) -> usize {
        forest
            .iter()
            .map(|node| 1 + count_nodes(&node.children))
            .sum()
    }

    #[test]
    fn buckets_children_under_parents() {
        let flat = vec![
            agent("root", None),
            agent("child-a", Some("root")),
            agent("child-b", Some("root")),
            agent("grandchild", Some("child-a")),
        ];
        let forest = build_sub_agent_tree(&flat);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children.len(), 2);
        assert_eq!(forest[0].children[0].children[0].id, "grandchild");
    }

    #[test]
    fn missing_parent_makes_a_root() {
        let flat = vec![agent("orphan", Some("never-seen")), agent("solo", None)];
        let forest = build_sub_agent_tree(&flat);
        assert_eq!(forest.len(), 2);
    }

    #[test]
    fn forward_reference_still_attaches() {
        let flat = vec![agent("child", Some("parent")), agent("parent", None)];
        let forest = build_sub_agent_tree(&flat);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, "parent");
        assert_eq!(forest[0].children[0].id, "child");
    }

    #[test]
    fn cycle_terminates_and_keeps_every_node() {
        let flat = vec![
            agent("a", Some("b")),
            agent("b", Some("a")),
            agent("c", Some("c")),
        ];
        let forest = build_sub_agent_tree(&flat);
        assert_eq!(count_nodes(&forest), 3);
    }

    #[test]
    fn long_cycle_terminates_and_keeps_every_node() {
        let flat = vec![
            agent("a", Some("c")),
            agent("b", Some("a")),
            agent("c", Some("b")),
            agent("leaf", Some("b")),
        ];
        let forest = build_sub_agent_tree(&flat);
        assert_eq!(count_nodes(&forest), 4);
    }

    #[test]
    fn empty_input_gives_empty_forest() {
        assert!(build_sub_agent_tree(&[]).is_empty());
    }
}

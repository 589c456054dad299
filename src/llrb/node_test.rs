use super::*;

#[test]
fn test_node() {
    let mut node: Box<Node<u64>> = Node::new(10, Color::Red);
    assert_eq!(node.is_black(), false);
    assert_eq!(node.size, 1);
    assert_eq!(*node.as_key(), 10);
    assert!(node.as_left_ref().is_none());
    assert!(node.as_right_ref().is_none());

    node.set_black();
    assert_eq!(node.color, Color::Black);
    node.set_red();
    assert_eq!(node.color, Color::Red);
    node.toggle_link();
    assert_eq!(node.is_black(), true);
    node.toggle_link();
    assert_eq!(node.is_black(), false);
}

#[test]
fn test_node_size() {
    let mut node: Box<Node<u64>> = Node::new(10, Color::Black);
    node.left = Some(Node::new(5, Color::Red));
    node.update_size();
    assert_eq!(node.size, 2);

    node.right = Some(Node::new(20, Color::Red));
    node.update_size();
    assert_eq!(node.size, 3);

    let mut left = node.left.take().unwrap();
    left.left = Some(Node::new(1, Color::Red));
    left.update_size();
    assert_eq!(left.size, 2);
    node.left = Some(left);
    node.update_size();
    assert_eq!(node.size, 4);

    node.left.take();
    node.update_size();
    assert_eq!(node.size, 2);
}

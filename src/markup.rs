//! The slice of an HTML tree the scraper needs: descendants by tag and class,
//! attributes, and trimmed text.

use select::{
    document::Document,
    node::Node,
    predicate::{Class, Name, Predicate},
};

pub trait Markup {
    type Element: Element;

    /// Descendants carrying `class`, restricted to `tag` when one is given,
    /// in document order.
    fn find_class(&self, tag: Option<&str>, class: &str) -> Vec<Self::Element>;

    fn first_class(&self, tag: Option<&str>, class: &str) -> Option<Self::Element> {
        self.find_class(tag, class).into_iter().next()
    }
}

pub trait Element: Markup<Element = Self> {
    fn attr(&self, name: &str) -> Option<&str>;

    fn trimmed_text(&self) -> String;
}

impl<'a> Markup for &'a Document {
    type Element = Node<'a>;

    fn find_class(&self, tag: Option<&str>, class: &str) -> Vec<Node<'a>> {
        match tag {
            Some(tag) => Document::find(*self, Name(tag).and(Class(class))).collect(),
            None => Document::find(*self, Class(class)).collect(),
        }
    }
}

impl<'a> Markup for Node<'a> {
    type Element = Node<'a>;

    fn find_class(&self, tag: Option<&str>, class: &str) -> Vec<Node<'a>> {
        match tag {
            Some(tag) => Node::find(self, Name(tag).and(Class(class))).collect(),
            None => Node::find(self, Class(class)).collect(),
        }
    }
}

impl<'a> Element for Node<'a> {
    fn attr(&self, name: &str) -> Option<&str> {
        Node::attr(self, name)
    }

    fn trimmed_text(&self) -> String {
        self.text().trim().to_owned()
    }
}

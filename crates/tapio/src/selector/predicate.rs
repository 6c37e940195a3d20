/*!
Predicate variants the selector chain is built from.

A closed set of tagged variants rather than ad-hoc closures: evaluation is a
match over the tag, and the `Custom` variant stays as the escape hatch for
caller-supplied logic. Every predicate is pure - evaluation reads the node
and nothing else, except the current foreground package, which bare-id and
package comparisons receive from the caller at evaluation time.
*/

use regex::Regex;

use crate::a11y::NodeFlags;
use crate::node::Node;
use crate::platform::UiNode;
use crate::types::Rect;

/// Which string attribute a matcher applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StrAttr {
  Text,
  Desc,
  FullId,
  BareId,
  ClassName,
  Package,
}

/// How a string attribute is compared.
#[derive(Debug, Clone)]
pub(crate) enum StrMatch {
  Equals(String),
  Contains(String),
  StartsWith(String),
  EndsWith(String),
  Matches(Regex),
}

impl StrMatch {
  fn matches(&self, value: &str) -> bool {
    match self {
      StrMatch::Equals(expected) => value == expected,
      StrMatch::Contains(needle) => value.contains(needle),
      StrMatch::StartsWith(prefix) => value.starts_with(prefix),
      StrMatch::EndsWith(suffix) => value.ends_with(suffix),
      StrMatch::Matches(pattern) => pattern.is_match(value),
    }
  }
}

/// Which boolean state flag a predicate tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlagAttr {
  Clickable,
  LongClickable,
  Checkable,
  Checked,
  Selected,
  Enabled,
  Scrollable,
  Editable,
  MultiLine,
  Password,
}

impl FlagAttr {
  fn value(self, flags: NodeFlags) -> bool {
    match self {
      FlagAttr::Clickable => flags.clickable,
      FlagAttr::LongClickable => flags.long_clickable,
      FlagAttr::Checkable => flags.checkable,
      FlagAttr::Checked => flags.checked,
      FlagAttr::Selected => flags.selected,
      FlagAttr::Enabled => flags.enabled,
      FlagAttr::Scrollable => flags.scrollable,
      FlagAttr::Editable => flags.editable,
      FlagAttr::MultiLine => flags.multi_line,
      FlagAttr::Password => flags.password,
    }
  }
}

/// How screen bounds are compared against the clause rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoundsMode {
  /// Bounds equal the rectangle exactly.
  Equals,
  /// Bounds lie fully inside the rectangle.
  Inside,
  /// Bounds fully contain the rectangle.
  Contains,
}

/// One clause of a selector chain.
pub(crate) enum Predicate<H: UiNode> {
  Str {
    attr: StrAttr,
    matcher: StrMatch,
  },
  Flag {
    attr: FlagAttr,
    expected: bool,
  },
  Bounds {
    mode: BoundsMode,
    rect: Rect,
  },
  /// Only ever matches on hosts that expose the attribute.
  DrawingOrder(i32),
  Custom(Box<dyn Fn(&Node<H>) -> bool + Send + Sync>),
}

impl<H: UiNode> std::fmt::Debug for Predicate<H> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Predicate::Str { attr, matcher } => f
        .debug_struct("Str")
        .field("attr", attr)
        .field("matcher", matcher)
        .finish(),
      Predicate::Flag { attr, expected } => f
        .debug_struct("Flag")
        .field("attr", attr)
        .field("expected", expected)
        .finish(),
      Predicate::Bounds { mode, rect } => f
        .debug_struct("Bounds")
        .field("mode", mode)
        .field("rect", rect)
        .finish(),
      Predicate::DrawingOrder(order) => f.debug_tuple("DrawingOrder").field(order).finish(),
      Predicate::Custom(_) => f.write_str("Custom(..)"),
    }
  }
}

impl<H: UiNode> Predicate<H> {
  /// Evaluate this clause against a node. `current_package` is the latest
  /// foreground package at evaluation time.
  pub(crate) fn matches(&self, node: &Node<H>, current_package: &str) -> bool {
    match self {
      Predicate::Str { attr, matcher } => {
        let value = match attr {
          StrAttr::Text => node.text(),
          StrAttr::Desc => node.description(),
          StrAttr::FullId => node.full_id(),
          StrAttr::BareId => node.bare_id(current_package),
          StrAttr::ClassName => node.class_name(),
          StrAttr::Package => node.package(),
        };
        matcher.matches(&value)
      }
      Predicate::Flag { attr, expected } => attr.value(node.flags()) == *expected,
      Predicate::Bounds { mode, rect } => {
        let bounds = node.bounds_in_screen();
        match mode {
          BoundsMode::Equals => bounds == *rect,
          BoundsMode::Inside => bounds.is_inside(rect),
          BoundsMode::Contains => bounds.contains(rect),
        }
      }
      Predicate::DrawingOrder(expected) => node.drawing_order() == Some(*expected),
      Predicate::Custom(check) => check(node),
    }
  }
}

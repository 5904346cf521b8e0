//! Server-rendered pages for browser clients.

use axum::http::StatusCode;

use crate::models::{CartItem, Product};

pub const EMPTY_CART: &str = "No items in cart";

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

const LOGOUT_FORM: &str = r#"<form id="logout" method="post" action="/logout">
    <button type="submit">Logout</button>
  </form>"#;

pub fn login_page() -> String {
    layout(
        "Login",
        r#"<h1>Login</h1>
<form id="login" method="post" action="/login">
  <label>Username <input type="text" name="username" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Login</button>
</form>"#,
    )
}

pub fn products_page(products: &[Product]) -> String {
    let items: String = products
        .iter()
        .map(|p| {
            format!(
                r#"  <li>{name} - ${price}
    <form method="post" action="/cart/add">
      <input type="hidden" name="product_id" value="{id}">
      <input type="hidden" name="quantity" value="1">
      <button type="submit">Add to Cart</button>
    </form>
  </li>
"#,
                name = escape(&p.name),
                price = p.price,
                id = p.id,
            )
        })
        .collect();

    layout(
        "Products",
        &format!(
            r#"<h1>Products</h1>
<ul id="product-list">
{items}</ul>
<nav>
  <a id="go-to-cart" href="/cart">Go to Cart</a>
  {LOGOUT_FORM}
</nav>"#
        ),
    )
}

pub fn cart_page(items: &[CartItem]) -> String {
    let lines = if items.is_empty() {
        format!("  <li>{EMPTY_CART}</li>\n")
    } else {
        items
            .iter()
            .map(|item| format!("  <li>{}</li>\n", escape(&item.display_line())))
            .collect()
    };

    layout(
        "Cart Page",
        &format!(
            r#"<h1>Cart Page</h1>
<ul id="cart-items">
{lines}</ul>
<nav>
  <form id="checkout" method="post" action="/checkout">
    <button id="checkout-button" type="submit">Proceed to Checkout</button>
  </form>
  <form id="cart-clear" method="post" action="/cart/clear">
    <button type="submit">Clear Cart</button>
  </form>
  <a href="/">Back to Products</a>
  {LOGOUT_FORM}
</nav>"#
        ),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Error");
    layout(
        reason,
        &format!(
            r#"<h1>{reason}</h1>
<p class="error">{message}</p>
<a href="/">Back to Products</a>"#,
            message = escape(message),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cart_shows_the_sentinel_once() {
        let page = cart_page(&[]);
        assert_eq!(page.matches("<li>").count(), 1);
        assert!(page.contains("<li>No items in cart</li>"));
    }

    #[test]
    fn cart_lines_show_name_price_and_quantity() {
        let page = cart_page(&[CartItem {
            id: 1,
            name: "Laptop".into(),
            price: 999,
            quantity: 2,
        }]);
        assert!(page.contains("<li>Laptop - $999 (Qty: 2)</li>"));
        assert!(!page.contains(EMPTY_CART));
    }

    #[test]
    fn product_names_are_escaped() {
        let page = products_page(&[Product {
            id: 3,
            name: "<script>alert(1)</script>".into(),
            price: 1,
        }]);
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains(r#"name="product_id" value="3""#));
    }

    #[test]
    fn error_page_uses_reason_phrase() {
        let page = error_page(StatusCode::BAD_REQUEST, "quantity must be > 0");
        assert!(page.contains("<h1>Bad Request</h1>"));
        assert!(page.contains("quantity must be &gt; 0"));
    }
}

/* src/whatsapp.rs */

use crate::phone::PhoneNumber;
use serde::Deserialize;
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderLine {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
}

impl OrderLine {
    pub fn total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Order summary sent to the brand's WhatsApp inbox.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderMessage {
    pub brand_name: String,
    pub order_id: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub currency: String,
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub shipping: f64,
}

impl OrderMessage {
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(OrderLine::total).sum()
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.shipping
    }

    pub fn render(&self) -> String {
        let cur = &self.currency;

        let mut lines = vec![
            format!("New order from {}", self.brand_name),
            format!("Order: #{}", self.order_id),
            format!("Name: {}", self.customer_name),
            format!("Phone: {}", self.phone),
            format!("Address: {}", self.address),
            String::new(),
        ];

        for (i, line) in self.lines.iter().enumerate() {
            let details: Vec<&str> = [line.color.as_deref(), line.size.as_deref()]
                .into_iter()
                .flatten()
                .filter(|s| !s.is_empty())
                .collect();

            let mut item = format!("{}. {}", i + 1, line.name);
            if !details.is_empty() {
                item.push_str(&format!(" ({})", details.join(", ")));
            }
            item.push_str(&format!(" x{} = {}{:.2}", line.quantity, cur, line.total()));
            lines.push(item);
        }

        lines.push(String::new());
        lines.push(format!("Subtotal: {}{:.2}", cur, self.subtotal()));
        lines.push(format!("Shipping: {}{:.2}", cur, self.shipping));
        lines.push(format!("Total: {}{:.2}", cur, self.total()));

        lines.join("\n")
    }
}

/// Click-to-chat link opening a conversation with `to`, prefilled with
/// `message`. The text is form-encoded, so spaces become `+`.
pub fn whatsapp_link(to: &PhoneNumber, message: &str) -> String {
    let text: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("https://wa.me/{}?text={}", to.as_str(), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> OrderMessage {
        OrderMessage {
            brand_name: "Acme".into(),
            order_id: "1042".into(),
            customer_name: "Rahim".into(),
            phone: "+8801711000000".into(),
            address: "House 4, Road 2, Dhaka".into(),
            currency: "Tk ".into(),
            lines: vec![
                OrderLine {
                    name: "Panjabi".into(),
                    color: Some("Navy Blue".into()),
                    size: Some("L".into()),
                    quantity: 2,
                    unit_price: 1_450.0,
                },
                OrderLine {
                    name: "Cap".into(),
                    color: None,
                    size: None,
                    quantity: 1,
                    unit_price: 200.0,
                },
            ],
            shipping: 60.0,
        }
    }

    #[test]
    fn test_renders_lines_and_totals() {
        let text = message().render();
        assert!(text.starts_with("New order from Acme\nOrder: #1042\n"));
        assert!(text.contains("1. Panjabi (Navy Blue, L) x2 = Tk 2900.00\n"));
        assert!(text.contains("2. Cap x1 = Tk 200.00\n"));
        assert!(text.contains("Subtotal: Tk 3100.00\n"));
        assert!(text.ends_with("Total: Tk 3160.00"));
    }

    #[test]
    fn test_link_encodes_message() {
        let phone = PhoneNumber::parse("+880 1711 000000").unwrap();
        let link = whatsapp_link(&phone, "Hi there\nটাকা & more~");
        assert_eq!(
            link,
            "https://wa.me/8801711000000?text=Hi+there%0A%E0%A6%9F%E0%A6%BE%E0%A6%95%E0%A6%BE+%26+more%7E"
        );

        let parsed = url::Url::parse(&link).unwrap();
        let (key, text) = parsed.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert_eq!(text, "Hi there\nটাকা & more~");
    }
}

use dojo_core::{Block, Span};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let markup = if args.len() > 1 {
        std::fs::read_to_string(&args[1]).expect("Failed to read file")
    } else {
        "# Heian Shodan\n\nFirst of the [Heian kata](/lesson/heian).\n- **Yoi**\n- `Rei`".to_string()
    };

    for (i, block) in dojo_core::parse(&markup).iter().enumerate() {
        match block {
            Block::Heading { level, content } => {
                println!("{i:3} H{level} {}", describe(content));
            }
            Block::Paragraph { content } => println!("{i:3} P  {}", describe(content)),
            Block::Blockquote { content } => println!("{i:3} >  {}", describe(content)),
            Block::List(list) => {
                println!("{i:3} UL {} items", list.items.len());
                for item in &list.items {
                    println!("      - {}", describe(&item.content));
                }
            }
        }
    }
}

fn describe(spans: &[Span]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text { text } => format!("{text:?}"),
            Span::Bold { text } => format!("bold({text:?})"),
            Span::Italic { text } => format!("italic({text:?})"),
            Span::Code { text } => format!("code({text:?})"),
            Span::Link { label, url, target } => format!("link({label:?} -> {url} {target:?})"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

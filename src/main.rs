use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use huffcode::{CodeTable, EncodedStream, Huffman, TreeNode, format_bits, parse_frequencies};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_MESSAGE: &str = "hello world";
const DEMO_FREQUENCIES: &str = "h=1,e=1,l=3,o=2, =1,w=1,r=1,d=1";

#[derive(Debug, Parser)]
#[command(version, about = "Huffman encode and decode text")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode TEXT with a tree built from its own frequencies
    Encode {
        text: String,

        /// Also print the tree
        #[arg(long)]
        tree: bool,
    },
    /// Decode BITS with a tree rebuilt from a frequency literal
    Decode {
        bits: String,

        /// Comma separated symbol=count pairs, e.g. a=3,b=1
        #[arg(long)]
        freqs: String,
    },
    /// Encode "hello world" and decode it with a tree rebuilt from its frequencies
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Encode { text, tree } => run_encode(&text, tree),
        Command::Decode { bits, freqs } => run_decode(&bits, &freqs),
        Command::Demo => run_demo(),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_encode(text: &str, show_tree: bool) -> Result<()> {
    let huffman = Huffman::new(text.chars()).context("build huffman tree")?;
    let encoded = huffman.encode(text.chars()).context("encode message")?;
    let decoded: String = huffman
        .decode(&encoded)
        .context("decode message")?
        .into_iter()
        .collect();

    print_report(text, &encoded, huffman.codes(), &decoded);
    if show_tree {
        print_tree(huffman.root());
    }
    Ok(())
}

fn run_decode(bits: &str, freqs: &str) -> Result<()> {
    let freq = parse_frequencies(freqs).context("parse frequency literal")?;
    let huffman = Huffman::from_frequencies(&freq).context("build huffman tree")?;
    let stream: EncodedStream = bits.parse().context("parse bit string")?;
    let decoded: String = huffman
        .decode(&stream)
        .context("decode message")?
        .into_iter()
        .collect();

    println!("Decoded message: {decoded}");
    Ok(())
}

fn run_demo() -> Result<()> {
    let (encoded, codes) = huffcode::encode_str(DEMO_MESSAGE).context("encode demo message")?;

    let freq = parse_frequencies(DEMO_FREQUENCIES).context("parse demo frequencies")?;
    let root = huffcode::build_tree(&freq).context("rebuild demo tree")?;
    let decoded = huffcode::decode_str(&encoded, &root).context("decode demo message")?;
    info!(bits = encoded.len(), "demo round trip complete");

    print_report(DEMO_MESSAGE, &encoded, &codes, &decoded);
    Ok(())
}

fn print_report(original: &str, encoded: &EncodedStream, codes: &CodeTable<char>, decoded: &str) {
    println!("Original message: {original}");
    println!("Encoded message: {encoded}");
    println!("Huffman codes:");
    for (symbol, code) in codes {
        println!("{symbol:?}: {}", format_bits(code));
    }
    println!("Decoded message: {decoded}");
}

fn print_tree(root: &TreeNode<char>) {
    println!("Huffman tree:");
    print!("{}", root.render());
}

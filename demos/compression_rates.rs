use std::fs;

use huffman_text_compression::{compression_ratio, encode};


fn main() {

    for name in ["lorem.txt", "multilingual.txt", "single_symbol.txt"] {

        let text = fs::read_to_string(format!("test_data/{name}"))
            .unwrap_or_else(|err| panic!("Could not open file {err}"));

        let compressed = encode(&text)
            .unwrap_or_else(|err| panic!("Could not compress {name}: {err}"));

        println!("{name}\nOriginal size: {} bytes\nCompressed size: {} bytes\nCompression rate: {:.2}\n",
            text.len(), compressed.len(), compression_ratio(text.len(), compressed.len()));
    }

}

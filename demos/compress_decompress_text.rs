use std::fs;

use huffman_text_compression::{CodecConfig, TextCodec};


fn main() {

    let codec = TextCodec::new(
        CodecConfig::from_env()
            .unwrap_or_else(|err| panic!("Invalid configuration: {}", err))
    );

    // Compress

    let compressed = codec.encode_file("test_data/lorem.txt")
        .unwrap_or_else(|err| panic!("Could not compress file: {}", err));

    fs::create_dir_all("target/demos")
        .unwrap_or_else(|err| panic!("Could not create output directory: {}", err));

    fs::write("target/demos/lorem.txt.huff", &compressed)
        .unwrap_or_else(|err| panic!("Could not write to file: {}", err));


    // Decompress

    let decompressed_text = codec.decode_file("target/demos/lorem.txt.huff")
        .unwrap_or_else(|err| panic!("Could not decompress data: {}", err));

    let original_text = fs::read_to_string("test_data/lorem.txt")
        .unwrap_or_else(|err| panic!("Could not open file: {}", err));

    assert_eq!(original_text, decompressed_text);
}

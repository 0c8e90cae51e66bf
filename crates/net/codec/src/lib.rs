//! Protobuf framing shared by the space quota protocols.
//!
//! [`ProtocolCodec`] moves a domain type over a byte stream by converting it
//! to and from its generated protobuf message, with varint length-delimited
//! framing. [`encode_message`] and [`decode_message`] handle the unframed
//! form used when a message is stored or handed to a transport as a blob.

use std::marker::PhantomData;

use bytes::BytesMut;
use quick_protobuf::{BytesReader, MessageRead, MessageWrite, Writer};

/// Length-delimited codec carrying `Protocol` values as `Proto` messages.
///
/// Encoding converts the value with `Into<Proto>` and cannot fail on content;
/// only I/O and framing errors surface. Decoding first parses a whole frame
/// and then validates it with `TryFrom<Proto>`, so a frame that is well-formed
/// protobuf but semantically invalid yields the conversion error `E`, not a
/// framing error. Incomplete frames decode to `Ok(None)`.
///
/// The size limit is checked when a frame header is read.
pub struct ProtocolCodec<Proto, Protocol, E>(
    quick_protobuf_codec::Codec<Proto>,
    PhantomData<(Protocol, E)>,
);

impl<Proto, Protocol, E> ProtocolCodec<Proto, Protocol, E> {
    /// Create a codec that rejects frames larger than `max_packet_size` bytes.
    pub fn new(max_packet_size: usize) -> Self {
        Self(
            quick_protobuf_codec::Codec::new(max_packet_size),
            PhantomData,
        )
    }
}

/// Writes `varint(len) || message` for each item.
impl<Proto, Protocol, E> asynchronous_codec::Encoder for ProtocolCodec<Proto, Protocol, E>
where
    Proto: MessageWrite,
    Protocol: Into<Proto>,
    quick_protobuf_codec::Error: Into<E>,
    E: From<std::io::Error>,
{
    type Item<'a> = Protocol;
    type Error = E;

    fn encode(&mut self, item: Self::Item<'_>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.0.encode(item.into(), dst).map_err(Into::into)
    }
}

/// Reads one frame at a time and converts it into the domain type.
impl<Proto, Protocol, PE, E> asynchronous_codec::Decoder for ProtocolCodec<Proto, Protocol, E>
where
    Proto: for<'a> MessageRead<'a>,
    Protocol: TryFrom<Proto, Error = PE>,
    PE: Into<E>,
    quick_protobuf_codec::Error: Into<E>,
    E: From<std::io::Error>,
{
    type Item = Protocol;
    type Error = E;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.0.decode(src).map_err(Into::into)? {
            Some(proto) => Protocol::try_from(proto).map(Some).map_err(Into::into),
            None => Ok(None),
        }
    }
}

/// Serialize a message to its unframed protobuf bytes.
pub fn encode_message<M: MessageWrite>(message: &M) -> quick_protobuf::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(message.get_size());
    message.write_message(&mut Writer::new(&mut buf))?;
    Ok(buf)
}

/// Parse a message from unframed protobuf bytes.
pub fn decode_message<'a, M: MessageRead<'a>>(bytes: &'a [u8]) -> quick_protobuf::Result<M> {
    let mut reader = BytesReader::from_bytes(bytes);
    M::from_reader(&mut reader, bytes)
}

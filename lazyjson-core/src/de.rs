//! Streaming `serde` decoder.
//!
//! A [`Decoder`] consumes exactly the tokens of one JSON value from a
//! [`ReaderLexer`] and leaves the lexer immediately after it. Nothing past the
//! value is read, except whitespace and the one byte of lookahead the lexer
//! needs to end a bare literal.
//!
//! Strings are decoded into the lexer's scratch buffer, so only owned types
//! (`String`, not `&str`) can be deserialized.

use std::io::Read;

use serde::de::{self, DeserializeOwned, DeserializeSeed, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

use crate::error::{Error, Result};
use crate::lexer::ReaderLexer;
use crate::token::{Literal, Number, TokenClass};

/// Default limit on object and array nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Decodes one value at a time from a borrowed lexer.
pub struct Decoder<'a, R> {
    lexer: &'a mut ReaderLexer<R>,
    remaining_depth: usize,
}

impl<'a, R: Read> Decoder<'a, R> {
    pub fn new(lexer: &'a mut ReaderLexer<R>, max_depth: usize) -> Self {
        Self {
            lexer,
            remaining_depth: max_depth,
        }
    }

    /// Decode one value of type `T`.
    pub fn decode<T: DeserializeOwned>(&mut self) -> Result<T> {
        T::deserialize(self)
    }

    /// Decode one value through a stateful seed.
    pub fn decode_seed<'de, S: DeserializeSeed<'de>>(&mut self, seed: S) -> Result<S::Value> {
        seed.deserialize(self)
    }

    fn enter(&mut self) -> Result<()> {
        if self.remaining_depth == 0 {
            return Err(Error::RecursionLimitExceeded {
                offset: self.lexer.offset(),
            });
        }
        self.remaining_depth -= 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.remaining_depth += 1;
    }

    fn visit_literal<'de, V: Visitor<'de>>(&mut self, visitor: V) -> Result<V::Value> {
        let offset = self.lexer.offset();
        let text = self.lexer.consume_literal()?;
        match Literal::parse(text) {
            Some(Literal::Null) => visitor.visit_unit(),
            Some(Literal::Bool(value)) => visitor.visit_bool(value),
            Some(Literal::Number(Number::Unsigned(value))) => visitor.visit_u64(value),
            Some(Literal::Number(Number::Signed(value))) => visitor.visit_i64(value),
            Some(Literal::Number(Number::Float(value))) => visitor.visit_f64(value),
            None => Err(Error::InvalidLiteral {
                offset,
                literal: text.to_owned(),
            }),
        }
    }
}

impl<'de, 'x, 'a, R: Read> de::Deserializer<'de> for &'x mut Decoder<'a, R> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.lexer.peek_next_token()? {
            TokenClass::BeginObject => {
                self.enter()?;
                self.lexer.consume_next_token(TokenClass::BeginObject)?;
                let mut access = CommaSeparated::new(&mut *self, TokenClass::EndObject);
                let value = visitor.visit_map(&mut access)?;
                access.finish()?;
                self.leave();
                Ok(value)
            }
            TokenClass::BeginList => {
                self.enter()?;
                self.lexer.consume_next_token(TokenClass::BeginList)?;
                let mut access = CommaSeparated::new(&mut *self, TokenClass::EndList);
                let value = visitor.visit_seq(&mut access)?;
                access.finish()?;
                self.leave();
                Ok(value)
            }
            TokenClass::String => {
                let text = self.lexer.consume_string()?;
                visitor.visit_str(text)
            }
            TokenClass::Other => self.visit_literal(visitor),
            found => Err(self.lexer.unexpected("a value", found)),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if self.lexer.try_consume_null()? {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        match self.lexer.peek_next_token()? {
            TokenClass::String => {
                let variant = self.lexer.consume_string()?;
                let unit: de::value::StrDeserializer<'_, Error> = variant.into_deserializer();
                visitor.visit_enum(unit)
            }
            TokenClass::BeginObject => {
                self.enter()?;
                self.lexer.consume_next_token(TokenClass::BeginObject)?;
                let value = visitor.visit_enum(VariantAccess { de: &mut *self })?;
                self.lexer.consume_next_token(TokenClass::EndObject)?;
                self.leave();
                Ok(value)
            }
            found => Err(self.lexer.unexpected("enum variant", found)),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

/// Elements of an object or array, comma before every element but the first.
struct CommaSeparated<'x, 'a, R> {
    de: &'x mut Decoder<'a, R>,
    close: TokenClass,
    first: bool,
    done: bool,
}

impl<'x, 'a, R: Read> CommaSeparated<'x, 'a, R> {
    fn new(de: &'x mut Decoder<'a, R>, close: TokenClass) -> Self {
        Self {
            de,
            close,
            first: true,
            done: false,
        }
    }

    fn has_more(&mut self) -> Result<bool> {
        if self.done {
            return Ok(false);
        }
        if self.de.lexer.peek_next_token()? == self.close {
            self.de.lexer.consume_next_token(self.close)?;
            self.done = true;
            return Ok(false);
        }
        if !self.first {
            self.de.lexer.consume_next_token(TokenClass::Comma)?;
        }
        self.first = false;
        Ok(true)
    }

    // A visitor may stop before the closing token, e.g. a fixed-size tuple.
    fn finish(&mut self) -> Result<()> {
        if !self.done {
            self.de.lexer.consume_next_token(self.close)?;
            self.done = true;
        }
        Ok(())
    }
}

impl<'de, 'x, 'a, R: Read> de::SeqAccess<'de> for CommaSeparated<'x, 'a, R> {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        if !self.has_more()? {
            return Ok(None);
        }
        seed.deserialize(&mut *self.de).map(Some)
    }
}

impl<'de, 'x, 'a, R: Read> de::MapAccess<'de> for CommaSeparated<'x, 'a, R> {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        if !self.has_more()? {
            return Ok(None);
        }
        seed.deserialize(MapKey { de: &mut *self.de }).map(Some)
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        self.de.lexer.consume_next_token(TokenClass::Colon)?;
        seed.deserialize(&mut *self.de)
    }
}

/// Externally tagged enum: `{"Variant": content}`.
struct VariantAccess<'x, 'a, R> {
    de: &'x mut Decoder<'a, R>,
}

impl<'de, 'x, 'a, R: Read> de::EnumAccess<'de> for VariantAccess<'x, 'a, R> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, Self)> {
        let variant = seed.deserialize(MapKey { de: &mut *self.de })?;
        self.de.lexer.consume_next_token(TokenClass::Colon)?;
        Ok((variant, self))
    }
}

impl<'de, 'x, 'a, R: Read> de::VariantAccess<'de> for VariantAccess<'x, 'a, R> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        de::Deserialize::deserialize(self.de)
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value> {
        seed.deserialize(self.de)
    }

    fn tuple_variant<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        de::Deserializer::deserialize_seq(self.de, visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        de::Deserializer::deserialize_map(self.de, visitor)
    }
}

/// Object keys are always strings; numeric key types parse the string.
struct MapKey<'x, 'a, R> {
    de: &'x mut Decoder<'a, R>,
}

macro_rules! deserialize_numeric_key {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
            let offset = self.de.lexer.offset();
            let key = self.de.lexer.consume_string()?;
            let value: $ty = key.parse().map_err(|_| Error::InvalidLiteral {
                offset,
                literal: key.to_owned(),
            })?;
            visitor.$visit(value)
        }
    )*};
}

impl<'de, 'x, 'a, R: Read> de::Deserializer<'de> for MapKey<'x, 'a, R> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let key = self.de.lexer.consume_string()?;
        visitor.visit_str(key)
    }

    deserialize_numeric_key! {
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let variant = self.de.lexer.consume_string()?;
        let unit: de::value::StrDeserializer<'_, Error> = variant.into_deserializer();
        visitor.visit_enum(unit)
    }

    forward_to_deserialize_any! {
        bool i128 u128 f32 f64 char str string bytes byte_buf unit unit_struct
        seq tuple tuple_struct map struct identifier ignored_any
    }
}

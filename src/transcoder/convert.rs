use crate::{Error, MAX_DEPTH, NodeKind, Result, Transcoder, cold_path};

/// Rebuilds `node` of format `source` as an equivalent node of format
/// `target`, without any knowledge of a logical type.
///
/// Scalars keep their kind, lists and compounds are converted element by
/// element. A kind the target cannot represent is rejected with
/// [`ErrorKind::UnsupportedConversion`](crate::ErrorKind::UnsupportedConversion)
/// rather than approximated. The only exception is a null compound entry
/// going into a format without null, which is dropped: such formats treat a
/// null entry and an absent entry the same way.
pub fn convert<S, D>(source: &S, node: &S::Node, target: &D) -> Result<D::Node>
where
    S: Transcoder + ?Sized,
    D: Transcoder + ?Sized,
{
    convert_at(source, node, target, 0)
}

fn convert_at<S, D>(source: &S, node: &S::Node, target: &D, depth: usize) -> Result<D::Node>
where
    S: Transcoder + ?Sized,
    D: Transcoder + ?Sized,
{
    if depth > MAX_DEPTH {
        cold_path();
        return Err(Error::new(crate::ErrorKind::DepthExceeded(MAX_DEPTH)));
    }

    let kind = source.kind(node);
    if !target.supports(kind) {
        cold_path();
        return Err(Error::unsupported(
            kind,
            "the target format has no counterpart",
        ));
    }

    // a value the source cannot read back is not something we can carry over
    macro_rules! scalar {
        ($read:expr) => {
            $read.map_err(|e| Error::unsupported(kind, e.to_string()))?
        };
    }

    Ok(match kind {
        NodeKind::Null => target.create_null(),
        NodeKind::Bool => target.create_bool(scalar!(source.get_bool(node))),
        NodeKind::Byte => target.create_byte(scalar!(source.get_byte(node))),
        NodeKind::Short => target.create_short(scalar!(source.get_short(node))),
        NodeKind::Int => target.create_int(scalar!(source.get_int(node))),
        NodeKind::Long => target.create_long(scalar!(source.get_long(node))),
        NodeKind::Float => {
            let value = scalar!(source.get_float(node));
            check_finite(value.is_finite(), kind, target)?;
            target.create_float(value)
        }
        NodeKind::Double => {
            let value = scalar!(source.get_double(node));
            check_finite(value.is_finite(), kind, target)?;
            target.create_double(value)
        }
        NodeKind::String => target.create_string(&source.get_string(node)?),
        NodeKind::ByteArray => target.create_byte_array(&source.get_byte_array(node)?),
        NodeKind::IntArray => target.create_int_array(&source.get_int_array(node)?),
        NodeKind::LongArray => target.create_long_array(&source.get_long_array(node)?),
        NodeKind::List => {
            let items = source.get_list(node)?;
            let mut converted = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                converted.push(
                    convert_at(source, item, target, depth + 1).map_err(|e| e.at_index(index))?,
                );
            }
            target.create_list(converted)
        }
        NodeKind::Compound => {
            let entries = source.get_compound(node)?;
            let mut converted = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                if source.kind(value) == NodeKind::Null && !target.supports(NodeKind::Null) {
                    log::trace!("dropping null entry `{key}`: target format has no null");
                    continue;
                }
                converted.push((
                    key.to_owned(),
                    convert_at(source, value, target, depth + 1).map_err(|e| e.at_field(key))?,
                ));
            }
            target.create_compound(converted)
        }
    })
}

#[inline]
fn check_finite<D: Transcoder + ?Sized>(finite: bool, kind: NodeKind, target: &D) -> Result<()> {
    if !finite && !target.supports_non_finite() {
        cold_path();
        return Err(Error::unsupported(
            kind,
            "the target format cannot represent NaN or infinity",
        ));
    }
    Ok(())
}

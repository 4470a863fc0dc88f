//! Keyword tables.
//!
//! A [WordList] is a sorted set of byte words with two membership queries:
//! exact, and "prefixed" lookup where a list entry like `chr(` matches the
//! word `chr` when the caller passes `b'('` as the marker. The per-language
//! structs bundle the lists each lexer consults; hosts normally supply their
//! own tables, the `standard()` constructors cover the CLI and the tests.

/// A list of words with exact and marker-suffixed membership queries.
pub struct WordList {
    words: Vec<Box<[u8]>>,
}

impl WordList {
    /// Builds a list from whitespace-separated words.
    pub fn new(defs: &str) -> WordList {
        let mut words: Vec<Box<[u8]>> =
            defs.split_ascii_whitespace().map(|w| Box::from(w.as_bytes())).collect();
        words.sort_unstable();
        words.dedup();
        WordList { words }
    }

    pub fn empty() -> WordList {
        WordList { words: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &[u8]) -> bool {
        self.words.binary_search_by(|entry| entry.as_ref().cmp(word)).is_ok()
    }

    /// True when the list holds `word` itself or `word` directly followed by
    /// `marker` (`word(`-style entries denoting callable names).
    pub fn contains_prefixed(&self, word: &[u8], marker: u8) -> bool {
        if self.contains(word) {
            return true;
        }
        let mut probe = [0u8; 64];
        if word.len() >= probe.len() {
            return false;
        }
        probe[..word.len()].copy_from_slice(word);
        probe[word.len()] = marker;
        self.contains(&probe[..word.len() + 1])
    }
}

/// The keyword lists consulted by the C# lexer, in lookup order.
pub struct CSharpWordLists {
    pub keywords: WordList,
    pub types: WordList,
    pub preprocessor: WordList,
    pub attributes: WordList,
    pub classes: WordList,
    pub structs: WordList,
    pub interfaces: WordList,
    pub enumerations: WordList,
    pub constants: WordList,
    pub task_markers: WordList,
}

impl CSharpWordLists {
    /// Built-in tables for standalone use.
    pub fn standard() -> CSharpWordLists {
        CSharpWordLists {
            keywords: WordList::new(
                "abstract add alias and args as ascending async await base break by case catch \
                 checked class const continue default delegate descending do dynamic else equals \
                 event explicit extern false file finally fixed for foreach from get global goto \
                 group if implicit in init into is join let lock managed nameof namespace new \
                 not notnull null on operator or orderby out override params partial private \
                 protected public readonly record ref remove required return scoped sealed select \
                 set sizeof stackalloc static switch this throw true try typeof unchecked unmanaged \
                 unsafe using value var virtual void volatile when where while with yield",
            ),
            types: WordList::new(
                "bool byte char decimal double float int long nint nuint object sbyte short \
                 string uint ulong ushort",
            ),
            preprocessor: WordList::new(
                "define elif else endif endregion error if line nullable pragma region undef \
                 warning",
            ),
            attributes: WordList::new(
                "Conditional DllImport Flags Obsolete Serializable StructLayout ThreadStatic",
            ),
            classes: WordList::new(
                "Array Console Convert Delegate Enum Exception GC List Math Object Random String \
                 StringBuilder Task Tuple Type",
            ),
            structs: WordList::new("DateTime Guid Span TimeSpan ValueTuple"),
            interfaces: WordList::new(
                "IComparable IDisposable IEnumerable IEnumerator IEquatable IList IQueryable",
            ),
            enumerations: WordList::new("DayOfWeek StringComparison StringSplitOptions"),
            constants: WordList::new("MaxValue MinValue NaN"),
            task_markers: WordList::new("TODO FIXME XXX HACK NOTE"),
        }
    }
}

/// The keyword lists consulted by the Basic lexer, in lookup order.
pub struct BasicWordLists {
    pub keywords: WordList,
    pub type_keywords: WordList,
    pub classic_keywords: WordList,
    pub preprocessor: WordList,
    pub attributes: WordList,
    pub classes: WordList,
    pub interfaces: WordList,
    pub enumerations: WordList,
    pub constants: WordList,
    pub functions: WordList,
    pub task_markers: WordList,
}

impl BasicWordLists {
    /// Built-in tables for standalone use. List entries are lowercase; the
    /// lexer lowercases identifiers before lookup.
    pub fn standard() -> BasicWordLists {
        BasicWordLists {
            keywords: WordList::new(
                "addhandler addressof alias and andalso as begin byref byval call case catch \
                 class const continue custom declare default delegate dim do each else elseif end \
                 enum erase error event exit false finally for friend function get global gosub \
                 goto handles if( implements imports in inherits interface is isnot let lib like \
                 loop me mod module mustinherit mustoverride mybase myclass namespace narrowing \
                 new next not nothing notinheritable notoverridable of on operator option \
                 optional or orelse overloads overridable overrides paramarray partial private \
                 property protected public raiseevent readonly redim rem removehandler resume \
                 return select set shadows shared static step stop structure sub synclock then \
                 throw to true try trycast( type typeof( until using wend when where while \
                 widening with withevents writeonly xor",
            ),
            type_keywords: WordList::new(
                "boolean byte cbool cbyte cchar cdate cdbl cdec char cint clng cobj csbyte \
                 cshort csng cstr ctype cuint culng cushort currency date decimal double \
                 integer long object sbyte short single string uinteger ulong ushort variant",
            ),
            classic_keywords: WordList::new(
                "attribute base beep close defbool defbyte defcur defdate defdbl defint deflng \
                 defobj defsng defstr defvar input line lock open print put seek unlock write",
            ),
            preprocessor: WordList::new("const else elseif end externalsource if region"),
            attributes: WordList::new("clscompliant( obsolete( serializable webmethod("),
            classes: WordList::new("collection err random stringbuilder"),
            interfaces: WordList::new("icomparable idisposable ienumerable ienumerator"),
            enumerations: WordList::new("filemode vbdayofweek vbmsgboxresult"),
            constants: WordList::new(
                "vbcr vbcrlf vbfalse vblf vbnewline vbnull vbnullchar vbnullstring vbtab vbtrue",
            ),
            functions: WordList::new(
                "abs( array( asc( atn( cdate( chr( cos( curdir( date( dateadd( datediff( \
                 datepart( dateserial( datevalue( day( environ( eof( exp( filter( fix( format( \
                 hex( hour( iif( input( instr( int( isarray( isdate( isempty( isnull( \
                 isnumeric( join( lbound( lcase( left( len( log( ltrim( mid( minute( month( \
                 msgbox( now( oct( replace( right( rnd( rtrim( second( sgn( sin( space( split( \
                 sqr( str( strcomp( string( tan( time( timer( trim( ubound( ucase( val( \
                 weekday( year(",
            ),
            task_markers: WordList::new("TODO FIXME XXX HACK NOTE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WordList;

    #[test]
    fn exact_membership() {
        let list = WordList::new("alpha beta gamma");
        assert!(list.contains(b"beta"));
        assert!(!list.contains(b"bet"));
        assert!(!list.contains(b"betas"));
        assert!(!WordList::empty().contains(b"beta"));
    }

    #[test]
    fn prefixed_membership() {
        let list = WordList::new("chr( mid( rem trycast(");
        assert!(list.contains_prefixed(b"chr", b'('));
        assert!(list.contains_prefixed(b"rem", b'('));
        assert!(!list.contains(b"chr"));
        assert!(!list.contains_prefixed(b"ch", b'('));
        assert!(!list.contains_prefixed(b"chrx", b'('));
    }

    #[test]
    fn duplicate_definitions_collapse() {
        let list = WordList::new("a a b\n b\t c");
        assert!(list.contains(b"a"));
        assert!(list.contains(b"c"));
    }
}

//!An ordered map with many values per key.

use std::collections::HashMap;
use std::iter::FromIterator;
use std::fmt;
use std::slice;
use std::vec;
use std::str::FromStr;

use context::Pairs;

///An ordered map where each key may have many values.
///
///The pairs are kept in the order they were added, duplicates included.
///Lookups come in two flavors: `get` for the first value of a key and
///`get_all` for every value of it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MultiDict(Pairs);

impl MultiDict {
    ///Create an empty `MultiDict`.
    pub fn new() -> MultiDict {
        MultiDict(Vec::new())
    }

    ///Get the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|&&(ref k, _)| k == key).map(|&(_, ref v)| &**v)
    }

    ///Get every value for `key`, in the order they were added.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.0.iter().filter(|&&(ref k, _)| k == key).map(|&(_, ref v)| &**v).collect()
    }

    ///Get the value for `key`, but only if there is exactly one of them.
    pub fn get_one(&self, key: &str) -> Option<&str> {
        let mut values = self.0.iter().filter(|&&(ref k, _)| k == key);
        match (values.next(), values.next()) {
            (Some(&(_, ref value)), None) => Some(&**value),
            _ => None
        }
    }

    ///Returns true if there is at least one value for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|&(ref k, _)| k == key)
    }

    ///Append a value for `key`, keeping any previous values.
    pub fn add<K, V>(&mut self, key: K, value: V) where K: Into<String>, V: Into<String> {
        self.0.push((key.into(), value.into()));
    }

    ///Replace every value for `key` with `value`.
    pub fn insert<K, V>(&mut self, key: K, value: V) where K: Into<String>, V: Into<String> {
        let key = key.into();
        self.0.retain(|&(ref k, _)| *k != key);
        self.0.push((key, value.into()));
    }

    ///Remove every value for `key` and return them.
    pub fn remove(&mut self, key: &str) -> Vec<String> {
        let (removed, kept): (Pairs, Pairs) = self.0.drain(..).partition(|&(ref k, _)| k == key);
        self.0 = kept;
        removed.into_iter().map(|(_, v)| v).collect()
    }

    ///The number of pairs, counting duplicate keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    ///Returns true if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    ///Iterate over the pairs, in order.
    pub fn iter(&self) -> Iter {
        Iter(self.0.iter())
    }

    ///Iterate over the keys, once for each of their values.
    pub fn keys<'a>(&'a self) -> impl Iterator<Item=&'a str> + 'a {
        self.iter().map(|(k, _)| k)
    }

    ///Borrow the pairs.
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }

    ///Turn the map back into its pairs.
    pub fn into_pairs(self) -> Pairs {
        self.0
    }

    ///Collect the values of each key into a list.
    pub fn dict_of_lists(&self) -> HashMap<String, Vec<String>> {
        let mut lists: HashMap<String, Vec<String>> = HashMap::new();
        for &(ref k, ref v) in &self.0 {
            lists.entry(k.clone()).or_insert_with(Vec::new).push(v.clone());
        }
        lists
    }

    ///Try to parse the first value for `key` as `T`, if it exists. The error
    ///will be `None` if there is no value, and `Some` if there is one, but the
    ///parsing failed.
    ///
    ///```
    ///use formvars::MultiDict;
    ///
    ///let vars: MultiDict = vec![("age", "42"), ("name", "Alice")].into_iter().collect();
    ///
    ///let age: Result<u8, _> = vars.parse("age");
    ///assert_eq!(age, Ok(42));
    ///
    ///let name: Result<u8, _> = vars.parse("name");
    ///assert!(name.unwrap_err().is_some());
    ///
    ///let missing: Result<u8, _> = vars.parse("height");
    ///assert_eq!(missing, Err(None));
    ///```
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<T, Option<T::Err>> {
        if let Some(value) = self.get(key) {
            value.parse().map_err(Some)
        } else {
            Err(None)
        }
    }

    ///Try to parse the first value for `key` as `T`, if it exists, or
    ///return the default in `or`.
    ///
    ///```
    ///use formvars::MultiDict;
    ///
    ///let vars: MultiDict = vec![("page", "three")].into_iter().collect();
    ///assert_eq!(vars.parse_or("page", 0u8), 0);
    ///```
    pub fn parse_or<T: FromStr>(&self, key: &str, or: T) -> T {
        self.parse(key).unwrap_or(or)
    }

    ///Try to parse the first value for `key` as `T`, if it exists, or create
    ///a new one using `or_else`. The `or_else` function will receive the
    ///parsing error if the value existed, but was impossible to parse.
    pub fn parse_or_else<T, F>(&self, key: &str, or_else: F) -> T where
        T: FromStr,
        F: FnOnce(Option<T::Err>) -> T
    {
        self.parse(key).unwrap_or_else(or_else)
    }
}

///An iterator over the pairs of a `MultiDict`.
pub struct Iter<'a>(slice::Iter<'a, (String, String)>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<(&'a str, &'a str)> {
        self.0.next().map(|&(ref k, ref v)| (&**k, &**v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl fmt::Debug for MultiDict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("MultiDict").field(&self.0).finish()
    }
}

fn same_pairs<K: AsRef<str>, V: AsRef<str>>(ours: &[(String, String)], theirs: &[(K, V)]) -> bool {
    ours.len() == theirs.len() && ours.iter().zip(theirs).all(|(&(ref k1, ref v1), &(ref k2, ref v2))| {
        k1 == k2.as_ref() && v1 == v2.as_ref()
    })
}

impl<K: AsRef<str>, V: AsRef<str>> PartialEq<[(K, V)]> for MultiDict {
    fn eq(&self, other: &[(K, V)]) -> bool {
        same_pairs(&self.0, other)
    }
}

impl<'a, K: AsRef<str>, V: AsRef<str>> PartialEq<&'a [(K, V)]> for MultiDict {
    fn eq(&self, other: &&'a [(K, V)]) -> bool {
        same_pairs(&self.0, other)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> PartialEq<Vec<(K, V)>> for MultiDict {
    fn eq(&self, other: &Vec<(K, V)>) -> bool {
        same_pairs(&self.0, other)
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> PartialEq<[(K, V); N]> for MultiDict {
    fn eq(&self, other: &[(K, V); N]) -> bool {
        same_pairs(&self.0, other)
    }
}

impl From<Pairs> for MultiDict {
    fn from(pairs: Pairs) -> MultiDict {
        MultiDict(pairs)
    }
}

impl From<MultiDict> for Pairs {
    fn from(dict: MultiDict) -> Pairs {
        dict.0
    }
}

impl IntoIterator for MultiDict {
    type IntoIter = vec::IntoIter<(String, String)>;
    type Item = (String, String);

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a MultiDict {
    type IntoIter = Iter<'a>;
    type Item = (&'a str, &'a str);

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MultiDict {
    fn from_iter<T: IntoIterator<Item=(K, V)>>(iterable: T) -> MultiDict {
        MultiDict(iterable.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for MultiDict {
    fn extend<T: IntoIterator<Item=(K, V)>>(&mut self, iter: T) {
        self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())))
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::MultiDict;

    fn sample() -> MultiDict {
        vec![("a", "1"), ("b", "2"), ("c", "3"), ("b", "4")].into_iter().collect()
    }

    #[test]
    fn first_and_all_values() {
        let dict = sample();
        assert_eq!(dict.get("b"), Some("2"));
        assert_eq!(dict.get_all("b"), vec!["2", "4"]);
        assert_eq!(dict.get_all("a"), vec!["1"]);
        assert!(dict.get_all("x").is_empty());
        assert_eq!(dict.get("x"), None);
    }

    #[test]
    fn exactly_one_value() {
        let dict = sample();
        assert_eq!(dict.get_one("a"), Some("1"));
        assert_eq!(dict.get_one("b"), None);
        assert_eq!(dict.get_one("x"), None);
    }

    #[test]
    fn add_and_insert() {
        let mut dict = sample();
        dict.add("a", "5");
        assert_eq!(dict.get_all("a"), vec!["1", "5"]);

        dict.insert("b", "6");
        assert_eq!(dict, [("a", "1"), ("c", "3"), ("a", "5"), ("b", "6")]);
    }

    #[test]
    fn remove_values() {
        let mut dict = sample();
        assert_eq!(dict.remove("b"), vec!["2".to_owned(), "4".to_owned()]);
        assert!(!dict.contains_key("b"));
        assert_eq!(dict, [("a", "1"), ("c", "3")]);
        assert!(dict.remove("b").is_empty());
    }

    #[test]
    fn compare_with_pairs() {
        let dict = sample();
        assert_eq!(dict, vec![("a", "1"), ("b", "2"), ("c", "3"), ("b", "4")]);
        assert_eq!(dict, vec![("a".to_owned(), "1".to_owned()), ("b".into(), "2".into()), ("c".into(), "3".into()), ("b".into(), "4".into())]);
        assert!(dict != vec![("a", "1"), ("b", "4"), ("c", "3"), ("b", "2")]);
        assert!(dict != vec![("a", "1")]);
        assert_eq!(dict, sample());
    }

    #[test]
    fn keep_order() {
        let dict = sample();
        assert_eq!(dict.keys().collect::<Vec<_>>(), vec!["a", "b", "c", "b"]);
        assert_eq!(dict.iter().nth(3), Some(("b", "4")));
        assert_eq!(dict.len(), 4);
        assert!(!dict.is_empty());
        assert!(MultiDict::new().is_empty());
    }

    #[test]
    fn lists_of_values() {
        let mut expected = HashMap::new();
        expected.insert("a".to_owned(), vec!["1".to_owned()]);
        expected.insert("b".to_owned(), vec!["2".to_owned(), "4".to_owned()]);
        expected.insert("c".to_owned(), vec!["3".to_owned()]);
        assert_eq!(sample().dict_of_lists(), expected);
    }

    #[test]
    fn parse_values() {
        let dict: MultiDict = vec![("n", "12"), ("n", "13"), ("s", "x")].into_iter().collect();
        assert_eq!(dict.parse::<u32>("n"), Ok(12));
        assert!(dict.parse::<u32>("s").unwrap_err().is_some());
        assert_eq!(dict.parse::<u32>("m"), Err(None));
        assert_eq!(dict.parse_or("s", 7u32), 7);
        assert_eq!(dict.parse_or_else::<u32, _>("m", |e| if e.is_some() { 1u32 } else { 2 }), 2);
    }

    #[test]
    fn extend_keeps_duplicates() {
        let mut dict = sample();
        dict.extend(vec![("a", "9")]);
        assert_eq!(dict.get_all("a"), vec!["1", "9"]);
        assert_eq!(dict.into_pairs().len(), 5);
    }
}
